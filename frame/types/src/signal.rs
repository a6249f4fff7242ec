/*!
    Stream control signals.
*/

/**
    Signals for per-stream control.

    These communicate sender-side state changes to the receiving
    pipeline, such as a participant disconnecting or restarting
    their capture.
*/
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StreamSignal {
    /**
        Flush buffers — a discontinuity in the stream (e.g., the sender
        restarted capture and sequence numbers start over).

        Recipients should clear any buffered data and reset internal state.
    */
    Flush,
    /**
        End of stream — no more frames will be produced.

        Recipients should process any remaining buffered data and finalize.
    */
    Eos,
}
