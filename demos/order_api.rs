//! Order lifecycle over HTTP
//!
//! Wires an e-commerce `Order` model into a served resource router:
//! one generated POST route per declared transition.
//!
//! Run with: cargo run --example order_api
//!
//! Then:
//!   curl -X POST http://127.0.0.1:3000/orders/1/pay
//!   curl -X POST http://127.0.0.1:3000/orders/1/ship
//!   curl -X POST http://127.0.0.1:3000/orders/1/ship   # 400, already shipped

use async_trait::async_trait;
use axum::{Extension, Router};
use fsm_actions::actions::{Repository, RepositoryError, TransitionActions};
use fsm_actions::builder::{BuildError, RegistryBuilder, TransitionBuilder};
use fsm_actions::core::{State, StateModel, TransitionArgs, TransitionRegistry};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
enum OrderStatus {
    Draft,
    Paid,
    Shipped,
    Cancelled,
}

impl State for OrderStatus {
    fn name(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Paid => "paid",
            Self::Shipped => "shipped",
            Self::Cancelled => "cancelled",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Shipped | Self::Cancelled)
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct Order {
    id: String,
    status: OrderStatus,
    total: f64,
    shipping_address: Option<String>,
}

#[derive(Clone)]
struct Clerk {
    can_ship: bool,
}

impl StateModel for Order {
    type State = OrderStatus;
    type Principal = Clerk;

    fn state(&self) -> &OrderStatus {
        &self.status
    }

    fn set_state(&mut self, status: OrderStatus) {
        self.status = status;
    }

    fn transitions() -> Result<TransitionRegistry<Self>, BuildError> {
        RegistryBuilder::new()
            .transition(
                TransitionBuilder::new("pay")
                    .from(OrderStatus::Draft)
                    .to(OrderStatus::Paid)
                    .when(|order: &Order| order.total > 0.0),
            )?
            .transition(
                TransitionBuilder::new("ship")
                    .from(OrderStatus::Paid)
                    .to(OrderStatus::Shipped)
                    .when(|order: &Order| order.shipping_address.is_some())
                    .authorize(|_: &Order, clerk: &Clerk| clerk.can_ship)
                    .action(|order: &mut Order, _: &TransitionArgs| {
                        info!("creating shipment id={}", order.id);
                        Ok(())
                    }),
            )?
            .transition(
                TransitionBuilder::new("cancel")
                    .from(OrderStatus::Draft)
                    .from(OrderStatus::Paid)
                    .to(OrderStatus::Cancelled),
            )?
            .build()
    }
}

struct MemoryRepo {
    orders: Mutex<HashMap<String, Order>>,
}

#[async_trait]
impl Repository<Order> for MemoryRepo {
    async fn find(&self, id: &str) -> Result<Order, RepositoryError> {
        self.orders
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save(&self, model: &Order) -> Result<(), RepositoryError> {
        info!("saving order id={} status={}", model.id, model.status.name());
        self.orders
            .lock()
            .unwrap()
            .insert(model.id.clone(), model.clone());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut orders = HashMap::new();
    orders.insert(
        "1".to_string(),
        Order {
            id: "1".to_string(),
            status: OrderStatus::Draft,
            total: 42.5,
            shipping_address: Some("12 Quay St".to_string()),
        },
    );
    let repo = Arc::new(MemoryRepo {
        orders: Mutex::new(orders),
    });

    let actions = TransitionActions::<Order>::for_model()?;
    info!("generated actions names={:?}", actions.transition_names());

    let app = Router::new()
        .nest("/orders", actions.into_router(repo)?)
        .layer(Extension(Clerk { can_ship: true }));

    let listener = TcpListener::bind("127.0.0.1:3000").await?;
    info!("listening addr={}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
