mod handler;

pub use handler::DnsMessageHandler;
