use reqwest::StatusCode;

/// The remote call a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    HealthCheck,
    Register,
    Login,
    CreateProduct,
    ListProducts,
    GetProduct,
    UpdateProduct,
    DeleteProduct,
    CreateOrder,
    GetOrder,
    UpdateOrder,
    DeleteOrder,
    CreateOrderLines,
    GetOrderLine,
    UpdateOrderLine,
    DeleteOrderLine,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::HealthCheck => "health check",
            Operation::Register => "user registration",
            Operation::Login => "user login",
            Operation::CreateProduct => "create product",
            Operation::ListProducts => "list products",
            Operation::GetProduct => "get product",
            Operation::UpdateProduct => "update product",
            Operation::DeleteProduct => "delete product",
            Operation::CreateOrder => "create order",
            Operation::GetOrder => "get order",
            Operation::UpdateOrder => "update order",
            Operation::DeleteOrder => "delete order",
            Operation::CreateOrderLines => "create order lines",
            Operation::GetOrderLine => "get order line",
            Operation::UpdateOrderLine => "update order line",
            Operation::DeleteOrderLine => "delete order line",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Failed to build the HTTP client")]
    ClientBuild(#[source] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Failed to execute the {operation} request")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("{operation} failed: unexpected status {status}")]
    UnexpectedStatus {
        operation: Operation,
        status: StatusCode,
        body: String,
    },
    #[error("{operation} returned a malformed body")]
    MalformedBody {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
    #[error("Bearer token not found in the login response")]
    MissingToken,
}

impl ApiError {
    /// The status the server answered with, if it answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Transport { operation, .. }
            | ApiError::UnexpectedStatus { operation, .. }
            | ApiError::MalformedBody { operation, .. } => Some(*operation),
            ApiError::MissingToken => Some(Operation::Login),
            ApiError::ClientBuild(_) | ApiError::InvalidBaseUrl(_) => None,
        }
    }
}
