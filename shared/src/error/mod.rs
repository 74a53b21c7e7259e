//! Error codes, their HTTP mapping and the JSON error envelope
//!
//! | Range | Category   |
//! |-------|------------|
//! | 0xxx  | general    |
//! | 1xxx  | auth       |
//! | 2xxx  | permission |
//! | 3xxx  | employee   |
//! | 4xxx  | department |
//! | 5xxx  | hierarchy  |
//! | 9xxx  | system     |
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CeoDirectReportLimit).with_detail("department_id", 2);
//! assert_eq!(ApiResponse::error(&err).code, Some(5006));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
