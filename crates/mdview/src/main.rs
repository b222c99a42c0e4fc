mod app;
mod command;

use app::{Args, Cmd};
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(name = "mdview", version)]
pub struct Mdview {
    #[clap(flatten)]
    pub args: Args,

    #[clap(subcommand)]
    pub cmd: Cmd,
}

#[tokio::main]
async fn main() {
    let mdview = Mdview::parse();

    if let Err(e) = mdview.cmd.run(mdview.args).await {
        eprintln!("error: {e:?}");
        std::process::exit(1);
    }
}
