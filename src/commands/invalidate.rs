use anyhow::Result;
use dialoguer::Confirm;
use is_terminal::IsTerminal;

use cachet::application::{InvalidateOptions, InvalidateUseCase, PlanPipeline};
use cachet::domain::ports::PublishEventSink;
use cachet::infrastructure::{AwsCliCdn, ConsoleEventSink, JsonEventSink};

use super::Context;

#[derive(Debug, Clone)]
pub struct InvalidateFlags {
    pub paths: Vec<String>,
    pub all: bool,
    pub yes: bool,
    pub no_wait: bool,
}

pub fn cmd_invalidate(ctx: &Context, flags: InvalidateFlags) -> Result<()> {
    let config = &ctx.config;
    let pipeline = PlanPipeline::from_config(config)?;

    let confirmed = flags.all
        && (flags.yes
            || config.invalidation.explicit_wildcard_confirmed
            || confirm_wildcard(ctx.json)?);

    let options = InvalidateOptions {
        paths: flags.paths,
        all: flags.all,
        confirmed,
        wait: config.cdn.wait && !flags.no_wait,
    };

    let use_case = InvalidateUseCase::new(
        AwsCliCdn::new(config.cdn.profile.clone()),
        config.cdn.clone(),
        config.invalidation.clone(),
    );

    let sink: Box<dyn PublishEventSink> = if ctx.json {
        Box::new(JsonEventSink::stdout("invalidate"))
    } else {
        Box::new(ConsoleEventSink::stdout(true))
    };

    let outcome = use_case.execute(&pipeline.selector(), &options, sink.as_ref())?;
    if outcome.id.is_none() && !ctx.json {
        println!("Nothing to invalidate");
    }
    Ok(())
}

/// Ask on a terminal; anywhere else the answer is no
fn confirm_wildcard(json: bool) -> Result<bool> {
    if json || !std::io::stdin().is_terminal() {
        return Ok(false);
    }
    Ok(Confirm::new()
        .with_prompt("Invalidate every cached object (/*)?")
        .default(false)
        .interact()?)
}
