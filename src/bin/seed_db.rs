use std::path::PathBuf;

use clap::Parser;

use dbserve::fixture;

/// Create the sample database file the development server hands out
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Where to write the database file
    #[arg(
        long,
        value_name = "PATH",
        env = "DBSERVE_FIXTURE_PATH",
        default_value = "assets/dbs/blog.db"
    )]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let summary = fixture::seed_database(&args.output).await?;

    println!(
        "✓ Created {} ({:.1} KB)",
        summary.path.display(),
        summary.size_kb()
    );
    println!("Tables:");
    println!("  - orders ({} rows)", summary.orders);
    println!("  - customers ({} rows)", summary.customers);

    Ok(())
}
