//! The checkout flow: shipping, payment, confirmation.
//!
//! A checkout session is ephemeral. It is created when the Checkout page
//! is entered and destroyed when checkout completes or the shopper
//! navigates away; a reload during checkout loses progress by design.
//!
//! Steps advance Shipping -> Payment -> Confirmation with a single back
//! transition Payment -> Shipping; no transition skips a step. Payment is
//! an asynchronous simulated call: while it is in flight, re-submission
//! is an idempotent no-op, and the rest of the system (cart, navigation,
//! notifications) stays fully responsive.
//!
//! Completion side effects run exactly once per session, in order:
//! success notification, cart clear, navigate Home. A payment that
//! resolves after the shopper navigated away finds its session gone and
//! does nothing.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use maygloss_core::{CartItem, OrderNumber, Price};
use rand::Rng;

use crate::cart::CartStore;
use crate::config::CheckoutConfig;
use crate::notify::{NotificationBus, NotificationKind};
use crate::router::{Page, Router};

/// Simulated payment-processor latency.
pub const PAYMENT_LATENCY: Duration = Duration::from_millis(1500);

/// Steps of the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Shipping,
    Payment,
    Confirmation,
}

/// A finalized order, produced once per completed checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    /// Order reference shown to the shopper (e.g., "MG-8829-10").
    pub number: OrderNumber,
    /// Bag lines at the moment of payment.
    pub items: Vec<CartItem>,
    /// Sum of line totals, pre-shipping.
    pub subtotal: Price,
    /// Computed shipping cost.
    pub shipping: Price,
    /// Subtotal plus shipping.
    pub grand_total: Price,
    /// When payment was confirmed.
    pub placed_at: DateTime<Utc>,
}

struct Session {
    epoch: u64,
    step: CheckoutStep,
    processing: bool,
    completed: bool,
}

struct FlowInner {
    session: Option<Session>,
    next_epoch: u64,
}

/// The checkout state machine.
///
/// Cheaply cloneable handle over the live session, if any.
#[derive(Clone)]
pub struct CheckoutFlow {
    inner: Arc<Mutex<FlowInner>>,
    config: CheckoutConfig,
    cart: CartStore,
    bus: NotificationBus,
    router: Router,
}

impl CheckoutFlow {
    /// Create a flow with no live session.
    #[must_use]
    pub fn new(
        config: CheckoutConfig,
        cart: CartStore,
        bus: NotificationBus,
        router: Router,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FlowInner {
                session: None,
                next_epoch: 0,
            })),
            config,
            cart,
            bus,
            router,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a session at the Shipping step.
    ///
    /// Idempotent while a session is live, so re-entering the Checkout
    /// view cannot reset progress.
    pub fn begin(&self) {
        let mut inner = self.lock();
        if inner.session.is_none() {
            let epoch = inner.next_epoch;
            inner.next_epoch += 1;
            inner.session = Some(Session {
                epoch,
                step: CheckoutStep::Shipping,
                processing: false,
                completed: false,
            });
            tracing::debug!(epoch, "checkout session started");
        }
    }

    /// Discard the session, if any.
    ///
    /// Called when the shopper navigates away. An in-flight payment is
    /// not cancelled; its completion finds the session gone and no-ops.
    pub fn abandon(&self) {
        if self.lock().session.take().is_some() {
            tracing::debug!("checkout session abandoned");
        }
    }

    /// The live session's step, if a session exists.
    #[must_use]
    pub fn step(&self) -> Option<CheckoutStep> {
        self.lock().session.as_ref().map(|s| s.step)
    }

    /// Whether a payment is currently in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.lock().session.as_ref().is_some_and(|s| s.processing)
    }

    /// Advance Shipping -> Payment.
    ///
    /// Addresses are not validated here; validation, if any, is a
    /// rendering-layer concern.
    pub fn continue_to_payment(&self) {
        let mut inner = self.lock();
        if let Some(session) = inner.session.as_mut()
            && session.step == CheckoutStep::Shipping
        {
            session.step = CheckoutStep::Payment;
        }
    }

    /// Step back Payment -> Shipping.
    pub fn back_to_shipping(&self) {
        let mut inner = self.lock();
        if let Some(session) = inner.session.as_mut()
            && session.step == CheckoutStep::Payment
            && !session.processing
        {
            session.step = CheckoutStep::Shipping;
        }
    }

    /// Shipping cost for a subtotal: free strictly above the threshold,
    /// otherwise the flat fee.
    #[must_use]
    pub fn shipping_cost(&self, subtotal: Price) -> Price {
        if subtotal > self.config.free_shipping_threshold {
            Price::ZERO
        } else {
            self.config.flat_shipping_fee
        }
    }

    /// Subtotal plus shipping.
    #[must_use]
    pub fn grand_total(&self, subtotal: Price) -> Price {
        subtotal + self.shipping_cost(subtotal)
    }

    /// Submit payment from the Payment step.
    ///
    /// Simulates processor latency, then transitions to Confirmation and
    /// runs the completion side effects exactly once. Returns the
    /// finalized order, or `None` when the call was ignored: no session,
    /// wrong step, already processing, or the session was abandoned while
    /// the payment was in flight.
    pub async fn submit_payment(&self) -> Option<Order> {
        let epoch = {
            let mut inner = self.lock();
            let session = inner.session.as_mut()?;
            if session.step != CheckoutStep::Payment || session.processing || session.completed {
                return None;
            }
            session.processing = true;
            session.epoch
        };

        // No lock held while the payment is in flight; the rest of the
        // system stays responsive.
        tokio::time::sleep(PAYMENT_LATENCY).await;

        {
            let mut inner = self.lock();
            match inner.session.as_mut() {
                Some(session) if session.epoch == epoch && !session.completed => {
                    session.processing = false;
                    session.step = CheckoutStep::Confirmation;
                    session.completed = true;
                }
                _ => {
                    tracing::debug!(epoch, "payment resolved after session ended; ignoring");
                    return None;
                }
            }
        }

        Some(self.finalize())
    }

    /// Build the order and run the completion side effects, in order:
    /// publish success, clear the cart, navigate Home.
    fn finalize(&self) -> Order {
        let items = self.cart.items();
        let subtotal = self.cart.total();
        let shipping = self.shipping_cost(subtotal);
        let order = Order {
            number: generate_order_number(),
            items,
            subtotal,
            shipping,
            grand_total: subtotal + shipping,
            placed_at: Utc::now(),
        };
        tracing::info!(number = %order.number, total = %order.grand_total, "order placed");

        self.bus
            .publish("Order placed successfully!", NotificationKind::Success);
        self.cart.clear();
        self.router.navigate(Page::Home, None);
        // The session is consumed with the completion
        self.abandon();

        order
    }
}

/// Generate a shopper-facing order reference.
fn generate_order_number() -> OrderNumber {
    let mut rng = rand::rng();
    OrderNumber::new(format!(
        "MG-{}-{}",
        rng.random_range(1000..10000),
        rng.random_range(10..100)
    ))
}
