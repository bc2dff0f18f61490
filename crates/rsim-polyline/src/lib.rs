//! `rsim-polyline` — the encoded polyline format used by routing services.
//!
//! A polyline is a compact ASCII string: each coordinate is stored as a
//! zig-zag encoded delta from the previous one, scaled by 1e5 and split into
//! 5-bit groups offset by 63.  Decoding is lossy to 1e-5 degrees.
//!
//! | Item             | Purpose                                                |
//! |------------------|--------------------------------------------------------|
//! | [`Decoder`]      | Streaming iterator of `Result<GeoPoint, _>`            |
//! | [`decode`]       | Lenient: keeps every complete point, drops the rest    |
//! | [`try_decode`]   | Strict: surfaces a [`PolylineError`]                   |
//! | [`encode`]       | Inverse of `decode`                                    |

pub mod codec;
pub mod error;


pub use codec::{Decoder, PRECISION, decode, encode, try_decode};
pub use error::{PolylineError, PolylineResult};
