//! RPSLS player - terminal client binary.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    rpsls_player::runner::run().await
}
