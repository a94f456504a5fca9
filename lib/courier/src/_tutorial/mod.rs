//! # Tutorial: Describing Endpoints with courier
//!
//! Learn to describe HTTP endpoints as values and get typed results back.
//!
//! ## Chapters
//!
//! 1. [Getting Started][chapter_0] - Your first endpoint
//! 2. [Bodies & Capabilities][chapter_1] - Encoding, signing, interception
//! 3. [Results & Errors][chapter_2] - Decoding, `OptionalResponse`, `HttpError`
//! 4. [Sessions & Dispatch][chapter_3] - Transports, callbacks, notifications
//!
//! Ready? Start with [Chapter 0: Getting Started][chapter_0].

pub mod chapter_0;
pub mod chapter_1;
pub mod chapter_2;
pub mod chapter_3;
