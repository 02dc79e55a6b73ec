//! `tagwise recommend` command - suggest tags for a project or folder

use std::time::Instant;

use crate::cli::RecommendArgs;
use crate::commands::dispatch::{Command, CommandContext};
use crate::output_by_format_result;
use tagwise_core::engine::RecommendationEngine;
use tagwise_core::error::{Result, TagwiseError};
use tagwise_core::model::{EntityRef, Recommendation, RecommendationRequest};
use tagwise_core::trace_time;

pub struct RecommendCommand<'a> {
    pub args: &'a RecommendArgs,
}

impl Command for RecommendCommand<'_> {
    fn execute(&self, ctx: &CommandContext) -> Result<()> {
        let args = self.args;
        let db = ctx.open_database()?;

        let mut config = ctx.load_config()?.recommend;
        if let Some(limit) = args.limit {
            config = config.with_max_results(limit)?;
        }

        let mut request = RecommendationRequest::new(
            args.workspace.clone(),
            EntityRef::new(args.entity.clone(), args.kind),
            args.tag.clone(),
            args.user.clone(),
        );
        if let Some(at) = args.at {
            request = request.at(at);
        }

        let engine = RecommendationEngine::new(&db)
            .with_vectors(&db)
            .with_config(config);
        let start = Instant::now();
        let recommendations = engine.get_recommendations(&request)?;
        trace_time!(start, "recommend", count = recommendations.len());

        output_by_format_result!(ctx.cli.format,
            json => {
                println!("{}", serde_json::to_string_pretty(&recommendations)?);
                Ok::<(), TagwiseError>(())
            },
            human => {
                print_human(&recommendations, ctx.cli.quiet);
            }
        )
    }
}

fn print_human(recommendations: &[Recommendation], quiet: bool) {
    if recommendations.is_empty() {
        println!("no recommendations available");
        return;
    }

    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} [{}] {:.3}  {}",
            rank + 1,
            rec.tag.name,
            rec.tag.id,
            rec.score,
            rec.reason
        );
        if quiet {
            continue;
        }
        if let Some(names) = &rec.cooccurring_tags {
            if !names.is_empty() {
                println!("   used with: {}", names.join(", "));
            }
        }
        if let Some(items) = &rec.similar_items {
            let names: Vec<String> = items
                .iter()
                .map(|item| format!("{} ({})", item.name, item.kind))
                .collect();
            println!("   seen on: {}", names.join(", "));
        }
    }
}
