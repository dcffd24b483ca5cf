use std::path::Path;

use anyhow::Result;

use cachet::application::{PublishOptions, PublishUseCase};
use cachet::config::StorageKind;
use cachet::domain::ports::{PublishEventSink, StorageBackend};
use cachet::infrastructure::{
    AwsCliCdn, AwsCliStorage, ConsoleEventSink, JsonEventSink, LocalDirStorage,
};
use cachet::CachetError;

use super::Context;

#[derive(Debug, Clone, Copy)]
pub struct PublishFlags {
    pub dry_run: bool,
    pub no_delete: bool,
    pub no_wait: bool,
}

pub fn cmd_publish(ctx: &Context, source: &Path, flags: PublishFlags) -> Result<()> {
    let storage = &ctx.config.storage;
    match storage.kind {
        StorageKind::Local => {
            let directory = storage.directory.clone().ok_or(CachetError::NotConfigured {
                setting: "storage.directory",
                hint: "set [storage] directory when kind = \"local\"",
            })?;
            run(ctx, LocalDirStorage::new(directory), source, flags)
        }
        StorageKind::AwsCli => {
            let bucket = storage
                .bucket
                .clone()
                .filter(|b| !b.trim().is_empty())
                .ok_or(CachetError::NotConfigured {
                    setting: "storage.bucket",
                    hint: "set [storage] bucket or CACHET_BUCKET",
                })?;
            let backend = AwsCliStorage::new(bucket, &storage.prefix, storage.profile.clone());
            run(ctx, backend, source, flags)
        }
    }
}

fn run<S: StorageBackend>(
    ctx: &Context,
    storage: S,
    source: &Path,
    flags: PublishFlags,
) -> Result<()> {
    let config = &ctx.config;
    let cdn = AwsCliCdn::new(config.cdn.profile.clone());
    let use_case = PublishUseCase::new(storage, cdn, config)?;

    let options = PublishOptions::new(source)
        .with_dry_run(flags.dry_run)
        .with_delete(config.storage.delete && !flags.no_delete)
        .with_skip_unchanged(config.storage.skip_unchanged)
        .with_wait(config.cdn.wait && !flags.no_wait);

    let sink: Box<dyn PublishEventSink> = if ctx.json {
        Box::new(JsonEventSink::stdout("publish"))
    } else {
        Box::new(ConsoleEventSink::stdout(ctx.verbose > 0 || flags.dry_run))
    };

    use_case.execute(&options, sink.as_ref())?;
    Ok(())
}
