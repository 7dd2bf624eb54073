mod bearer_token;
mod credentials;
mod envelope;
mod order;
mod order_line;
mod product;
mod product_field;
mod resource_id;
mod username;

pub use bearer_token::BearerToken;
pub use credentials::Credentials;
pub use envelope::{Envelope, PageRequest, Pagination, ProductPage};
pub use order::{NewOrder, Order, OrderId, OrderUpdate};
pub use order_line::{NewOrderLine, OrderLine, OrderLineId, OrderLineUpdate, Quantity};
pub use product::{NewProduct, Product, ProductId, ProductUpdate};
pub use product_field::ProductField;
pub use resource_id::ResourceId;
pub use username::Username;
