mod account;

pub use account::CurrentAccount;
