//! Functionality to compress and decompress page regions.

pub use super::parquet_bridge::Compression;

use crate::error::{Error, Result};

/// A codec for one of the parquet compression algorithms.
///
/// `decompress` writes into an output buffer whose length is the expected
/// uncompressed size; producing fewer bytes is an error.
pub trait Codec: std::fmt::Debug {
    /// Compresses `input_buf`, appending the result to `output_buf`.
    fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()>;

    /// Decompresses `input_buf` into `output_buf`, filling it completely.
    fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()>;
}

/// Given the compression type `codec`, returns a codec used to compress and
/// decompress bytes for the compression type.
/// This returns `None` if the codec type is `UNCOMPRESSED`.
pub fn create_codec(codec: &Compression) -> Result<Option<Box<dyn Codec>>> {
    match *codec {
        Compression::Uncompressed => Ok(None),
        #[cfg(feature = "snappy")]
        Compression::Snappy => Ok(Some(Box::new(SnappyCodec::new()))),
        #[cfg(not(feature = "snappy"))]
        Compression::Snappy => Err(Error::FeatureNotActive(
            crate::error::Feature::Snappy,
            "compress or decompress with snappy".to_string(),
        )),
        #[cfg(feature = "gzip")]
        Compression::Gzip => Ok(Some(Box::new(GZipCodec::new()))),
        #[cfg(not(feature = "gzip"))]
        Compression::Gzip => Err(Error::FeatureNotActive(
            crate::error::Feature::Gzip,
            "compress or decompress with gzip".to_string(),
        )),
        #[cfg(feature = "brotli")]
        Compression::Brotli => Ok(Some(Box::new(BrotliCodec::new()))),
        #[cfg(not(feature = "brotli"))]
        Compression::Brotli => Err(Error::FeatureNotActive(
            crate::error::Feature::Brotli,
            "compress or decompress with brotli".to_string(),
        )),
        #[cfg(feature = "lz4")]
        Compression::Lz4 => Ok(Some(Box::new(Lz4Codec::new()))),
        #[cfg(not(feature = "lz4"))]
        Compression::Lz4 => Err(Error::FeatureNotActive(
            crate::error::Feature::Lz4,
            "compress or decompress with lz4".to_string(),
        )),
        #[cfg(feature = "zstd")]
        Compression::Zstd => Ok(Some(Box::new(ZstdCodec::new()))),
        #[cfg(not(feature = "zstd"))]
        Compression::Zstd => Err(Error::FeatureNotActive(
            crate::error::Feature::Zstd,
            "compress or decompress with zstd".to_string(),
        )),
        Compression::Lzo | Compression::Lz4Raw => Err(Error::UnsupportedFeature(format!(
            "compression {:?}",
            codec
        ))),
    }
}

/// Decompresses `input` into `output`; `output.len()` is the expected
/// uncompressed size. `UNCOMPRESSED` is the identity.
pub fn decompress(codec: &Compression, input: &[u8], output: &mut [u8]) -> Result<()> {
    if let Some(mut decompressor) = create_codec(codec)? {
        decompressor.decompress(input, output)
    } else {
        if input.len() != output.len() {
            return Err(Error::decode(
                "the uncompressed page size does not match the page's bytes",
            ));
        }
        output.copy_from_slice(input);
        Ok(())
    }
}

/// Compresses `input`, appending the result to `output`. `UNCOMPRESSED` is
/// the identity.
pub fn compress(codec: &Compression, input: &[u8], output: &mut Vec<u8>) -> Result<()> {
    if let Some(mut compressor) = create_codec(codec)? {
        compressor.compress(input, output)
    } else {
        output.extend_from_slice(input);
        Ok(())
    }
}

#[cfg(feature = "snappy")]
mod snappy_codec {
    use snap::raw::{decompress_len, max_compress_len, Decoder, Encoder};

    use crate::compression::Codec;
    use crate::error::{Error, Result};

    /// Codec for Snappy compression format.
    #[derive(Debug)]
    pub struct SnappyCodec {
        decoder: Decoder,
        encoder: Encoder,
    }

    impl SnappyCodec {
        pub(crate) fn new() -> Self {
            Self {
                decoder: Decoder::new(),
                encoder: Encoder::new(),
            }
        }
    }

    impl Codec for SnappyCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let len = decompress_len(input_buf)?;
            if len > output_buf.len() {
                return Err(Error::decode(
                    "the snappy-decompressed size is larger than the page declares",
                ));
            }
            self.decoder
                .decompress(input_buf, output_buf)
                .map_err(|e| e.into())
                .map(|_| ())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let output_buf_len = output_buf.len();
            let required_len = max_compress_len(input_buf.len());
            output_buf.resize(output_buf_len + required_len, 0);
            let n = self
                .encoder
                .compress(input_buf, &mut output_buf[output_buf_len..])?;
            output_buf.truncate(output_buf_len + n);
            Ok(())
        }
    }
}
#[cfg(feature = "snappy")]
pub use snappy_codec::*;

#[cfg(feature = "gzip")]
mod gzip_codec {

    use std::io::{Read, Write};

    use flate2::{read, write, Compression};

    use crate::compression::Codec;
    use crate::error::Result;

    /// Codec for GZIP compression algorithm.
    #[derive(Debug)]
    pub struct GZipCodec {}

    impl GZipCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for GZipCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let mut decoder = read::GzDecoder::new(input_buf);
            decoder.read_exact(output_buf).map_err(|e| e.into())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = write::GzEncoder::new(output_buf, Compression::default());
            encoder.write_all(input_buf)?;
            encoder.try_finish().map_err(|e| e.into())
        }
    }
}
#[cfg(feature = "gzip")]
pub use gzip_codec::*;

#[cfg(feature = "brotli")]
mod brotli_codec {

    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::error::Result;

    const BROTLI_DEFAULT_BUFFER_SIZE: usize = 4096;
    const BROTLI_DEFAULT_COMPRESSION_QUALITY: u32 = 1; // supported levels 0-9
    const BROTLI_DEFAULT_LG_WINDOW_SIZE: u32 = 22; // recommended between 20-22

    /// Codec for Brotli compression algorithm.
    #[derive(Debug)]
    pub struct BrotliCodec {}

    impl BrotliCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for BrotliCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            brotli::Decompressor::new(input_buf, BROTLI_DEFAULT_BUFFER_SIZE)
                .read_exact(output_buf)
                .map_err(|e| e.into())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = brotli::CompressorWriter::new(
                output_buf,
                BROTLI_DEFAULT_BUFFER_SIZE,
                BROTLI_DEFAULT_COMPRESSION_QUALITY,
                BROTLI_DEFAULT_LG_WINDOW_SIZE,
            );
            encoder.write_all(input_buf)?;
            encoder.flush().map_err(|e| e.into())
        }
    }
}
#[cfg(feature = "brotli")]
pub use brotli_codec::*;

#[cfg(feature = "lz4")]
mod lz4_codec {
    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::error::Result;

    const LZ4_BUFFER_SIZE: usize = 4096;

    /// Codec for LZ4 (frame) compression algorithm.
    #[derive(Debug)]
    pub struct Lz4Codec {}

    impl Lz4Codec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    impl Codec for Lz4Codec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let mut decoder = lz4::Decoder::new(input_buf)?;
            decoder.read_exact(output_buf).map_err(|e| e.into())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = lz4::EncoderBuilder::new().build(output_buf)?;
            let mut from = 0;
            loop {
                let to = std::cmp::min(from + LZ4_BUFFER_SIZE, input_buf.len());
                encoder.write_all(&input_buf[from..to])?;
                from += LZ4_BUFFER_SIZE;
                if from >= input_buf.len() {
                    break;
                }
            }
            encoder.finish().1.map_err(|e| e.into())
        }
    }
}
#[cfg(feature = "lz4")]
pub use lz4_codec::*;

#[cfg(feature = "zstd")]
mod zstd_codec {
    use std::io::{Read, Write};

    use crate::compression::Codec;
    use crate::error::Result;

    /// Codec for Zstandard compression algorithm.
    #[derive(Debug)]
    pub struct ZstdCodec {}

    impl ZstdCodec {
        pub(crate) fn new() -> Self {
            Self {}
        }
    }

    /// Compression level (1-21) for ZSTD. Choose 1 here for better compression speed.
    const ZSTD_COMPRESSION_LEVEL: i32 = 1;

    impl Codec for ZstdCodec {
        fn decompress(&mut self, input_buf: &[u8], output_buf: &mut [u8]) -> Result<()> {
            let mut decoder = zstd::Decoder::new(input_buf)?;
            decoder.read_exact(output_buf).map_err(|e| e.into())
        }

        fn compress(&mut self, input_buf: &[u8], output_buf: &mut Vec<u8>) -> Result<()> {
            let mut encoder = zstd::Encoder::new(output_buf, ZSTD_COMPRESSION_LEVEL)?;
            encoder.write_all(input_buf)?;
            match encoder.finish() {
                Ok(_) => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}
#[cfg(feature = "zstd")]
pub use zstd_codec::*;

#[cfg(test)]
mod tests {
    use super::*;

    fn test_roundtrip(c: Compression, data: &[u8]) {
        let mut compressed = Vec::new();
        compress(&c, data, &mut compressed).expect("Error when compressing");

        let mut decompressed = vec![0; data.len()];
        decompress(&c, &compressed, &mut decompressed).expect("Error when decompressing");
        assert_eq!(data, decompressed.as_slice());
    }

    fn test_codec(c: Compression) {
        let sizes = vec![100, 10000, 100000];
        for size in sizes {
            let data = (0..size).map(|x| (x % 255) as u8).collect::<Vec<_>>();
            test_roundtrip(c, &data);
        }
    }

    #[test]
    fn test_codec_uncompressed() {
        test_codec(Compression::Uncompressed);
    }

    #[test]
    fn test_codec_snappy() {
        test_codec(Compression::Snappy);
    }

    #[test]
    fn test_codec_gzip() {
        test_codec(Compression::Gzip);
    }

    #[test]
    fn test_codec_brotli() {
        test_codec(Compression::Brotli);
    }

    #[test]
    fn test_codec_lz4() {
        test_codec(Compression::Lz4);
    }

    #[test]
    fn test_codec_zstd() {
        test_codec(Compression::Zstd);
    }

    #[test]
    fn unsupported_codecs_error() {
        assert!(create_codec(&Compression::Lzo).is_err());
        assert!(create_codec(&Compression::Lz4Raw).is_err());
    }
}
