//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. The sale repository owns the transactional core: sale
//! creation, cancellation, and edit/supersession.

pub mod collaborator;
pub mod inventory;
pub mod product;
pub mod receivable;
pub mod sale;
pub mod settings;
pub mod user;

pub use collaborator::{CollaboratorError, CollaboratorRepository, CreateCollaboratorInput};
pub use inventory::{InventoryError, InventoryRepository, RecordEntryInput};
pub use product::{
    CreateProductInput, ProductError, ProductFilter, ProductRepository, UpdateProductInput,
};
pub use receivable::{
    BatchSettleInput, ReceivableError, ReceivableFilter, ReceivableRepository, SettleInput,
};
pub use sale::{
    CancelSaleInput, CreateSaleInput, EditOutcome, EditSaleInput, SaleError, SaleFilter,
    SaleRepository, SaleWithItems,
};
pub use settings::SettingsRepository;
pub use user::{CreateUserInput, UserError, UserRepository};
