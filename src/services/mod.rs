//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion, and receive their collaborators explicitly
//! at construction time.

mod account_service;
mod token_issuer;

pub use account_service::{AccountManager, AccountService, LoginResponse};
pub use token_issuer::{Claims, TokenIssuer};
