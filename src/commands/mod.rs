pub mod address;
pub mod networks;
pub mod version;

pub use address::AddressCommand;
pub use networks::NetworksCommand;
pub use version::VersionCommand;
