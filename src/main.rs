use anyhow::Result;
use tweet_etl::{init_tracing_once, TweetETL};

const INPUT_PATH: &str = "./data/Economic_Twitter_Data.json";
const OUTPUT_PATH: &str = "./data/processed_tweet_data.csv";

fn main() -> Result<()> {
    init_tracing_once();

    let table = TweetETL::new()
        .input(INPUT_PATH)
        .output(OUTPUT_PATH)
        .overwrite(true)
        .progress(true)
        .run(true)?;

    tracing::info!("Wrote {} rows", table.len());
    println!("File Successfully Saved.!!!");
    Ok(())
}
