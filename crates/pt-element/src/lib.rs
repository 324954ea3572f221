//! `pt-element` — the things that live on a track.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`agent`]       | `MovingAgent` capability trait                             |
//! | [`annotation`]  | `FixedAnnotation` capability trait                         |
//! | [`mask`]        | `Mask`, the receding inaccessible region of a track        |
//! | [`polymerase`]  | `Polymerase`, `Direction` — reference moving agent         |
//! | [`site`]        | `CoverState`, `BindingSite`, `ReleaseSite`                 |
//! | [`error`]       | `ElementError`, `ElementResult<T>`                         |
//!
//! The track engine only ever talks to the two traits.  The concrete types
//! here validate their own construction arguments; the engine assumes
//! anything handed to it is already well-formed.

pub mod agent;
pub mod annotation;
pub mod error;
pub mod mask;
pub mod polymerase;
pub mod site;


pub use agent::MovingAgent;
pub use annotation::FixedAnnotation;
pub use error::{ElementError, ElementResult};
pub use mask::Mask;
pub use polymerase::{Direction, Polymerase};
pub use site::{BindingSite, CoverState, ReleaseSite};
