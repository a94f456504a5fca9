//! Prelude module for convenient imports.
//!
//! ```ignore
//! use courier_core::prelude::*;
//! ```

pub use crate::{
    CachePolicy, DateStrategy, HttpError, HttpResponse, Method, OptionalResponse, Raw, Request,
    Result, ResultFormat, Timestamp,
};
