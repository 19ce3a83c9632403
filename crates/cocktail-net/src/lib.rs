//! # cocktail-net
//!
//! Client for the remote recipe service.
//!
//! The service is a black box behind a REST API: recipe CRUD, server-side
//! like toggling, and the member endpoints for signup and login. This crate
//! owns the wire DTOs and the [`RecipeService`] wrapper that attaches the
//! caller's member number header to every request.

pub mod api;
pub mod client;

mod error;

pub use api::{
    ApiEnvelope, AvailabilityDto, CocktailDto, CocktailRequestDto, LikeDto, LoginDto, MemberDto,
    SignupDto,
};
pub use client::RecipeService;
pub use error::ServiceError;
