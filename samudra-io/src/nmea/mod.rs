//! NMEA 0183 sentence construction
//!
//! Everything needed to turn simulated instrument values into wire-ready
//! talker sentences:
//!
//! - [`angles`]: compass angle normalization and true wind angle
//! - [`checksum`]: XOR checksum over the sentence body
//! - [`position`]: dead reckoning and `DDMM.MMMM` coordinate formatting
//! - [`sentence`]: the immutable `$<body>*<HH>` sentence value
//!
//! # Sentence Format
//!
//! ```text
//! $IIDPT,42.3,,*77
//! │└─┬─┘└──┬──┘└┬┘
//! │  │     │    └── checksum: XOR of body bytes, 2 uppercase hex digits
//! │  │     └─────── comma separated fields
//! │  └───────────── talker (II) + sentence type (DPT)
//! └──────────────── start delimiter
//! ```

pub mod angles;
pub mod checksum;
pub mod position;
pub mod sentence;

pub use angles::{calculate_twa, normalize_angle, normalize_angle_180};
pub use checksum::{checksum, checksum_hex};
pub use sentence::Sentence;
