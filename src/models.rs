//! Public combustion models.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the computation and domain logic lives. The `core` module is an
//! implementation detail; its public types are re-exported by the model module.

pub mod combustion;
