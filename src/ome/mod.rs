//! # Typed Latest-Schema Model
//!
//! [`OmeRoot`] is the typed form of a latest-release document: images with
//! their pixel geometry and channels, the instruments they reference and
//! free text annotations. A typed root is always at the latest release by
//! construction; [`OmeRoot::to_element`] and [`OmeRoot::from_element`] move
//! between it and the generic tree.
//!
//! Identifiers absent from a source are synthesized with [`make_id`], a pure
//! function of the node kind and its indices, so translating the same input
//! twice produces the same identifiers.
//!
//! ```rust
//! use omebridge::ome::{make_id, IdKind};
//!
//! assert_eq!(make_id(IdKind::Image, &[0]), "Image:0");
//! assert_eq!(make_id(IdKind::Channel, &[0, 1]), "Channel:0:1");
//! ```

mod error;
mod ids;
mod model;
mod xml;


pub use error::OmeError;
pub use ids::{make_id, IdKind};
pub use model::{
    Channel, CommentAnnotation, Detector, DetectorSettings, Image, Instrument, Objective,
    ObjectiveSettings, OmeRoot, Pixels, Plane, Quantity,
};
