//! The checkout flow: state container, step sequencer, persistence, and
//! submission gateway.
//!
//! # Data flow
//!
//! ```text
//! user input -> CheckoutState -> SessionCheckoutStore (best-effort)
//!                                   -> on submit: gateway -> backend -> redirect
//! resume token -> backend fetch -> hydrate -> CheckoutState + Step::Review
//! ```

pub mod hydrate;
pub mod state;
pub mod step;
pub mod store;
pub mod submit;

pub use hydrate::Hydration;
pub use state::{BuyerField, CheckoutState, UtmParams};
pub use step::Step;
pub use store::{CheckoutSnapshot, SessionCheckoutStore};
pub use submit::SubmitError;
