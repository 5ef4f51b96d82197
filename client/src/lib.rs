//! Runtime primitives for restive generated clients.
//!
//! Code generated by `restive-gen` delegates to this crate: every
//! generated builder wraps one of the request-builder bases here and
//! forwards its strongly-typed binding methods to it.
//!
//! ## Core Types
//!
//! - [`Request`] - A fully-bound request description (the builders' output)
//! - [`ResourceSpec`] - Immutable per-resource metadata shared by builders
//! - [`CompoundKey`] / [`ComplexKey`] - Compound and composite key shapes
//! - [`ParamValue`] - Uniform representation of bound values
//! - [`RequestBuilderBase`] and the per-operation builders
//!   ([`GetRequestBuilder`], [`FindRequestBuilder`],
//!   [`ActionRequestBuilder`], ...)
//!
//! ## Scope
//!
//! The runtime stops at request *descriptions*: no serialization, no
//! transport. Pairing a [`Request`] with an HTTP stack is the consuming
//! application's concern.
//!
//! ## Examples
//!
//! ```
//! use restive_client::{GetRequestBuilder, Operation, ResourceSpec};
//!
//! let spec = ResourceSpec::new([Operation::Get]);
//! let request = GetRequestBuilder::<i64, ()>::new("widgets", spec)
//!     .id(7)
//!     .build();
//!
//! assert_eq!(request.op(), Operation::Get);
//! assert_eq!(request.uri(), "widgets");
//! ```

pub mod builder;
pub mod key;
pub mod request;
pub mod spec;
pub mod value;

// Re-exports for convenience
pub use builder::{
    ActionRequestBuilder, BatchCreateRequestBuilder, BatchDeleteRequestBuilder,
    BatchGetRequestBuilder, BatchPartialUpdateRequestBuilder, BatchUpdateRequestBuilder,
    CreateRequestBuilder, DeleteRequestBuilder, FindRequestBuilder, GetRequestBuilder,
    PartialUpdateRequestBuilder, RequestBuilderBase, UpdateRequestBuilder,
};
pub use key::{ComplexKey, CompoundKey, KeyPartError};
pub use request::{Payload, Request};
pub use spec::{Operation, ResourceSpec};
pub use value::ParamValue;
