#![deny(missing_docs)]

//! # AIS Models
//!
//! Strongly-typed records for AIS (ITU-R M.1371) messages and the NMEA 0183
//! sentence fields that carry them.
//!
//! ## Message hierarchy
//!
//! ```text
//! AisMessage
//! ├── position reports      1, 2, 3, 4, 9, 11, 18, 19, 27
//! ├── static / voyage data  5, 21, 24
//! ├── binary & safety       6, 7, 8, 12, 13, 14, 17, 25, 26
//! ├── link management       10, 15, 16, 20, 22, 23
//! └── Unknown               header-only fallback for any other type id
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`message`] | `AisMessage` sum type and the common `Header` |
//! | [`navigation`] | Navigation status, EPFD and manoeuvre enums, dimensions, ETA |
//! | [`position`] | Position-carrying report records |
//! | [`voyage`] | Static/voyage data, class B static data, aids-to-navigation |
//! | [`binary`] | Opaque binary payloads, binary/safety messages, acknowledgements |
//! | [`management`] | Inquiry, interrogation, assignment and channel-management records |
//! | [`sentence`] | NMEA sentence fields (`!AIVDM` / `!AIVDO`) |
//! | [`report`] | Flat JSON / CSV report rendering |

pub mod binary;
pub mod error;
pub mod management;
pub mod message;
pub mod navigation;
pub mod position;
pub mod report;
pub mod sentence;
pub mod voyage;

// Re-export all public types at crate root for convenience.
pub use binary::*;
pub use error::*;
pub use management::*;
pub use message::*;
pub use navigation::*;
pub use position::*;
pub use report::*;
pub use sentence::*;
pub use voyage::*;
