use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "people-cli")]
#[command(about = "Command-line client for the People API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every person
    List,
    /// Show one person
    Get { id: i32 },
    /// Create a person
    Create(PersonArgs),
    /// Replace a person's details
    Update {
        id: i32,
        #[command(flatten)]
        person: PersonArgs,
    },
    /// Delete a person
    Delete { id: i32 },
}

#[derive(Args)]
struct PersonArgs {
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long, default_value_t = 0)]
    age: i32,
}

impl PersonArgs {
    fn to_json(&self, id: Option<i32>) -> Value {
        let mut body = json!({
            "FirstName": self.first_name,
            "LastName": self.last_name,
            "Gender": self.gender,
            "Age": self.age,
        });
        if let Some(id) = id {
            body["ID"] = json!(id);
        }
        body
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}/api/person", cli.url.trim_end_matches('/'));

    let res = match &cli.command {
        Commands::List => client.get(&base).send().await?,
        Commands::Get { id } => client.get(format!("{base}/{id}")).send().await?,
        Commands::Create(person) => client.post(&base).json(&person.to_json(None)).send().await?,
        // The service looks the record up by the ID in the body.
        Commands::Update { id, person } => {
            client
                .put(format!("{base}/{id}"))
                .json(&person.to_json(Some(*id)))
                .send()
                .await?
        }
        Commands::Delete { id } => client.delete(format!("{base}/{id}")).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if let Some(location) = res.headers().get(reqwest::header::LOCATION) {
        println!("{} (Location: {})", status, location.to_str().unwrap_or("?"));
    } else {
        println!("{}", status);
    }

    let text = res.text().await?;
    if text.is_empty() {
        return Ok(());
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
