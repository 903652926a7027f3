//! Checkout module.
//!
//! Contains address and payment selections, submission readiness, and
//! order types.

mod address;
mod flow;
mod order;
mod payment;

pub use address::{Address, AddressDraft, AddressRef};
pub use flow::{is_ready_for_submission, missing_for_submission, CheckoutPhase};
pub use order::{
    OrderConfirmation, OrderLineRequest, OrderRequest, OrderStatus, OrderSummary,
    OrderSummaryLine,
};
pub use payment::{mask_card_number, CardDraft, PaymentMethodRef, PaymentSelection};
