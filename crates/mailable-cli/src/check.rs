//! Ad-hoc verification of a single address from the command line.

use clap::Args;
use mailable_core::AppConfig;

use crate::pipeline::{build_google_client, verify_one};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// The address to verify
    pub(crate) address: String,

    /// Skip USPS CASS gating of the confirmed flag
    #[arg(long)]
    pub(crate) no_cass: bool,

    /// Region code applied when interpreting USPS signals
    #[arg(long, default_value = "US")]
    pub(crate) region_code: String,
}

pub(crate) async fn run_check(config: &AppConfig, args: &CheckArgs) -> anyhow::Result<()> {
    let client = build_google_client(config)?;
    let verdict = verify_one(&client, &args.address, &args.region_code, !args.no_cass).await;

    println!("Address:    {}", verdict.original_address);
    println!("Validated:  {}", verdict.validated_address);
    println!("Mailable:   {}", if verdict.is_valid { "yes" } else { "no" });
    println!("Status:     {}", verdict.validation_status);
    println!("Confirmed:  {}", verdict.is_confirmed);
    println!("DPV:        {}", verdict.dpv_confirmation_description);
    println!(
        "Flags:      po_box={} dpv_confirmed={} vacant={} no_stat={} cmra={} undeliverable={}",
        verdict.is_po_box,
        verdict.is_dpv_confirmed,
        verdict.is_vacant,
        verdict.is_no_stat,
        verdict.is_cmra,
        verdict.is_undeliverable,
    );

    Ok(())
}
