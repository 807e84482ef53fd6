//! # AIS Codec
//!
//! Decoding and encoding of AIS messages carried in NMEA 0183 `!AIVDM` /
//! `!AIVDO` sentences.
//!
//! The crate provides:
//!
//! * [`Decoder`]: sentence lines in, [`ais_models::AisMessage`] records
//!   out, with checksum validation and multipart reassembly.
//! * [`Encoder`]: records in, checksummed (and, when needed, fragmented)
//!   sentences out.
//! * [`DecoderConfig`] / [`EncoderConfig`]: settings with defaults and
//!   `AIS_*` environment overrides.
//! * [`MultipartReassembler`]: TTL-bounded table of in-flight multipart
//!   messages keyed by [`FragmentKey`].
//! * [`Bits`], [`BitReader`], [`BitWriter`]: bit-level field access.
//! * [`CodecError`]: unified error type for all codec operations.
//!
//! The lower layers are available as modules: [`sixbit`] (payload armor),
//! [`nmea`] (sentence framing) and [`codec`] (per-type bit layouts).
//!
//! # Quick start
//!
//! ```rust
//! use ais_codec::{Decoder, DecoderConfig, Encoder, EncoderConfig};
//!
//! let decoder = Decoder::new(DecoderConfig::default());
//! let messages = decoder.parse_batch([
//!     "!AIVDM,1,1,,A,13aEOn?P00PD3wVMdLDRhgvL289?,0*02",
//!     "not a sentence",
//! ]);
//! assert_eq!(messages.len(), 1);
//! assert_eq!(messages[0].mmsi(), 244_670_424);
//!
//! let encoder = Encoder::new(EncoderConfig::default());
//! let sentences = encoder.encode(&messages[0]).unwrap();
//! assert!(ais_codec::nmea::validate(&sentences[0]));
//! ```

pub mod bits;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod nmea;
pub mod reassembly;
pub mod sixbit;

pub use bits::{BitReader, BitWriter, Bits};
pub use config::{DecoderConfig, EncoderConfig};
pub use decoder::{decode_payload, DecodedSentence, Decoder, DecoderStats};
pub use encoder::Encoder;
pub use error::CodecError;
pub use reassembly::{FragmentKey, MultipartReassembler, Reassembled};
