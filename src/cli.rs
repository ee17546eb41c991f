use std::net::{IpAddr, SocketAddr};

use clap::Parser;

#[derive(Parser)]
#[command(name = "ytbrief", about = "Web app that summarizes YouTube videos", version)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    pub port: u16,
}

impl Cli {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bind_addr() {
        let cli = Cli::parse_from(["ytbrief"]);
        assert_eq!(cli.bind_addr().to_string(), "127.0.0.1:8000");
    }

    #[test]
    fn test_custom_host_and_port() {
        let cli = Cli::parse_from(["ytbrief", "--host", "0.0.0.0", "--port", "9090"]);
        assert_eq!(cli.bind_addr().to_string(), "0.0.0.0:9090");
    }
}
