//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from specific business logic.

pub mod mime;
pub mod range;
pub mod response;

// Re-export commonly used types
pub use range::{parse_range_header, ByteRange, RangeError};
pub use response::{
    build_400_response, build_404_response, build_405_response, build_416_response,
    build_500_response, build_file_response, build_partial_response, full_body, ResponseBody,
};
