use anyhow::{Result, bail};
use clap::Args;
use panel_form::{HostRule, host_validity};

#[derive(Args, Debug, Clone)]
pub struct HostArgs {
    /// Value to check, e.g. www.example.com
    pub value: String,
    /// Accept an IPv4 address as well as a domain
    #[arg(long = "allow-ip")]
    pub allow_ip: bool,
}

pub fn run(args: &HostArgs) -> Result<()> {
    let rule = if args.allow_ip {
        HostRule::DomainOrIpv4
    } else {
        HostRule::Domain
    };
    match host_validity(&args.value, rule) {
        None => {
            println!("{}: valid", args.value);
            Ok(())
        }
        Some(message) => bail!("{}: {message}", args.value),
    }
}
