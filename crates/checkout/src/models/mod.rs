//! Session-stored model types and keys.

pub mod session_keys {
    //! Keys for checkout data in the visitor session.

    /// Key for the serialized checkout snapshot.
    pub const CHECKOUT_SNAPSHOT: &str = "checkout_snapshot";

    /// Key for the page path the checkout started on (reported to the
    /// order-creation endpoint as `source_page`).
    pub const SOURCE_PAGE: &str = "checkout_source_page";
}
