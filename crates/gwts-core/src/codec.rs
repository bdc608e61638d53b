use bytes::{Buf, BytesMut};
use prost::Message;
use std::io::{Read, Write};

use crate::{CodeGeneratorRequest, CodeGeneratorResponse, Result};

const MAX_MESSAGE_SIZE: usize = i32::MAX as usize; // protobuf 2GiB limit

pub struct PluginCodec;

impl PluginCodec {
    /// Decode a request from an in-memory buffer
    pub fn decode_request<B: Buf>(buf: B) -> Result<CodeGeneratorRequest> {
        if buf.remaining() > MAX_MESSAGE_SIZE {
            return Err(crate::GatewayError::Protocol(format!(
                "Request too large: {} bytes",
                buf.remaining()
            )));
        }
        Ok(CodeGeneratorRequest::decode(buf)?)
    }

    /// Encode a response into a fresh buffer
    pub fn encode_response(response: &CodeGeneratorResponse) -> Result<BytesMut> {
        let len = response.encoded_len();
        if len > MAX_MESSAGE_SIZE {
            return Err(crate::GatewayError::Protocol(format!(
                "Response too large: {} bytes",
                len
            )));
        }

        let mut buf = BytesMut::with_capacity(len);
        response.encode(&mut buf)?;
        Ok(buf)
    }

    /// Read a whole request from a reader (stdin for protoc)
    pub fn read_request<R: Read>(reader: &mut R) -> Result<CodeGeneratorRequest> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::decode_request(data.as_slice())
    }

    /// Write encoded response to writer
    pub fn write_response<W: Write>(
        writer: &mut W,
        response: &CodeGeneratorResponse,
    ) -> Result<()> {
        let encoded = Self::encode_response(response)?;
        writer.write_all(&encoded)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code_generator_response;

    #[test]
    fn test_read_request_from_reader() {
        let request = CodeGeneratorRequest {
            file_to_generate: vec!["demo/greeter.proto".to_string()],
            parameter: Some("use_static_classes=false".to_string()),
            ..Default::default()
        };
        let bytes = request.encode_to_vec();

        let decoded = PluginCodec::read_request(&mut bytes.as_slice()).unwrap();
        assert_eq!(decoded.file_to_generate, vec!["demo/greeter.proto"]);
        assert_eq!(decoded.parameter(), "use_static_classes=false");
    }

    #[test]
    fn test_write_response_is_decodable() {
        let response = CodeGeneratorResponse {
            file: vec![code_generator_response::File {
                name: Some("demo/greeter.pb.ts".to_string()),
                content: Some("export default {}".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut out = Vec::new();
        PluginCodec::write_response(&mut out, &response).unwrap();

        let decoded = CodeGeneratorResponse::decode(out.as_slice()).unwrap();
        assert_eq!(decoded, response);
        assert!(decoded.file[0].insertion_point.is_none());
    }

    #[test]
    fn test_garbage_input_is_a_decode_error() {
        let err = PluginCodec::decode_request(&[0xff, 0xff, 0xff][..]).unwrap_err();
        assert!(matches!(err, crate::GatewayError::Decode(_)));
    }
}
