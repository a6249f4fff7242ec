/*!
    JPEG frame coding for the frame crate ecosystem.

    Video travels between conference participants as individually
    JPEG-compressed frames, one per datagram. This crate owns both
    directions of that conversion:

    - [`JpegCodec`] encodes [`VideoFrame`]s at a configured quality,
      optionally enforcing a payload size budget
    - [`decode_jpeg`] turns received payloads back into packed RGB frames

    # Encoding

    ```ignore
    use frame_codec::{JpegCodec, MAX_DATAGRAM_PAYLOAD};

    let codec = JpegCodec::new(40).with_max_encoded_len(MAX_DATAGRAM_PAYLOAD);

    match codec.encode(&frame) {
        Ok(payload) => transport.send(payload),
        Err(frame_codec::Error::FrameTooLarge { len, .. }) => {
            // Too big for one datagram — skip this frame
        }
        Err(e) => return Err(e),
    }
    ```

    # Decoding

    ```ignore
    use frame_codec::decode_jpeg;

    let frame = decode_jpeg(&payload)?;
    // frame.format is always PixelFormat::Rgb24
    ```
*/

pub use frame_types::{Error, PixelFormat, Result, VideoFrame};

mod jpeg;

pub use jpeg::{JpegCodec, MAX_DATAGRAM_PAYLOAD, decode_jpeg};
