/// Route quote fetching and selection
pub mod api;
pub mod selection;
pub mod slippage;
pub mod types;

pub use api::{BridgeApi, StargateApi};
pub use selection::{
    FewestSteps, FirstRoute, HighestDstAmount, RouteSelectionPolicy, RouteSelector,
};
pub use slippage::dst_amount_min;
pub use types::{QuotesResponse, Route, Step, TransactionDescriptor, TransferIntent};
