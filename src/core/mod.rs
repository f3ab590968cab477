/*!
 * Core asset routing: classify, resolve, provision, transfer
 */

pub mod alias;
pub mod classify;
pub mod naming;
pub mod provision;
pub mod resolve;
pub mod transfer;

pub use alias::{parse_size_override, SizeAliasTable};
pub use classify::{classify, Classification, ClassifiedName};
pub use naming::CaseStyle;
pub use provision::{DirectoryProvisioner, Provisioned};
pub use resolve::DestinationResolver;
pub use transfer::{TransferExecutor, Transferred};
