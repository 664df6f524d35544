use crate::engine::ResponseBody;
use crate::error::{FetchError, Result};
use crate::types::BodyEncoding;
use encoding_rs::{CoderResult, Decoder};

const OK: u16 = 200;

/// Anything but exactly 200 is a failure; redirects are not followed.
pub(super) fn check_status(code: u16, message: &str) -> Result<()> {
    if code == OK {
        return Ok(());
    }
    Err(FetchError::HttpStatus {
        code,
        message: message.to_string(),
    })
}

/// Read the body to the end, decoding each chunk as it arrives.
pub(super) async fn read_body(
    url: &str,
    mut body: Box<dyn ResponseBody>,
    encoding: BodyEncoding,
) -> Result<String> {
    let mut decoder = BodyDecoder::new(encoding);
    let mut text = String::new();

    while let Some(chunk) = body
        .chunk()
        .await
        .map_err(|e| FetchError::transport(url, e))?
    {
        decoder.push(&chunk, &mut text, false);
    }
    decoder.push(&[], &mut text, true);

    Ok(text)
}

/// Incremental bytes-to-text decoder for one body.
pub(super) enum BodyDecoder {
    Latin1,
    Whatwg(Decoder),
}

impl BodyDecoder {
    pub(super) fn new(encoding: BodyEncoding) -> Self {
        match encoding {
            BodyEncoding::Latin1 => Self::Latin1,
            BodyEncoding::Whatwg(encoding) => {
                Self::Whatwg(encoding.new_decoder_without_bom_handling())
            }
        }
    }

    pub(super) fn push(&mut self, input: &[u8], out: &mut String, last: bool) {
        match self {
            Self::Latin1 => out.extend(input.iter().copied().map(char::from)),
            Self::Whatwg(decoder) => decode_into(decoder, input, out, last),
        }
    }
}

/// Feed `input` to the decoder, growing `out` until all of it is consumed.
///
/// Malformed sequences become U+FFFD. Partial sequences at the end of a chunk
/// stay in the decoder until the next call.
pub(super) fn decode_into(decoder: &mut Decoder, mut input: &[u8], out: &mut String, last: bool) {
    loop {
        let needed = decoder
            .max_utf8_buffer_length(input.len())
            .unwrap_or(input.len() * 3 + 16);
        out.reserve(needed);

        let (result, read, _replaced) = decoder.decode_to_string(input, out, last);
        input = &input[read..];

        match result {
            CoderResult::InputEmpty => break,
            CoderResult::OutputFull => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UTF_8: BodyEncoding = BodyEncoding::Whatwg(encoding_rs::UTF_8);

    fn decode_chunks(encoding: BodyEncoding, chunks: &[&[u8]]) -> String {
        let mut decoder = BodyDecoder::new(encoding);
        let mut out = String::new();
        for chunk in chunks {
            decoder.push(chunk, &mut out, false);
        }
        decoder.push(&[], &mut out, true);
        out
    }

    #[test]
    fn only_200_passes() {
        assert!(check_status(200, "OK").is_ok());
        for code in [201, 204, 301, 302, 304, 404, 500] {
            let err = check_status(code, "whatever").unwrap_err();
            assert_eq!(err.status_code(), Some(code));
        }
    }

    #[test]
    fn utf8_sequence_split_across_chunks() {
        // "é" is 0xC3 0xA9
        let out = decode_chunks(UTF_8, &[b"caf\xC3", b"\xA9 ok"]);
        assert_eq!(out, "café ok");
    }

    #[test]
    fn malformed_utf8_is_replaced() {
        let out = decode_chunks(UTF_8, &[b"a\xFFb"]);
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn truncated_sequence_at_end_is_replaced() {
        let out = decode_chunks(UTF_8, &[b"end\xE2\x82"]);
        assert_eq!(out, "end\u{FFFD}");
    }

    #[test]
    fn latin1_decodes_high_bytes() {
        let out = decode_chunks(BodyEncoding::Latin1, &[b"na\xEFve"]);
        assert_eq!(out, "naïve");
    }

    #[test]
    fn latin1_keeps_c1_range_as_is() {
        let out = decode_chunks(BodyEncoding::Latin1, &[b"\x80", b"\x9F"]);
        assert_eq!(out, "\u{80}\u{9F}");

        let all: Vec<u8> = (0..=255).collect();
        let out = decode_chunks(BodyEncoding::Latin1, &[&all]);
        let back: Vec<u8> = out.chars().map(|c| c as u32 as u8).collect();
        assert_eq!(back, all);
    }

    #[test]
    fn windows_1252_still_maps_c1_range() {
        let cp1252 = BodyEncoding::Whatwg(encoding_rs::WINDOWS_1252);
        let out = decode_chunks(cp1252, &[b"\x80"]);
        assert_eq!(out, "€");
    }

    #[test]
    fn bom_is_kept() {
        let out = decode_chunks(UTF_8, &[b"\xEF\xBB\xBFhi"]);
        assert_eq!(out, "\u{FEFF}hi");
    }

    #[test]
    fn empty_body_decodes_to_empty_string() {
        assert_eq!(decode_chunks(UTF_8, &[]), "");
    }
}
