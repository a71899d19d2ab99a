//! Build command - cross compile a package in the build container

use crate::build::{assemble_invocation, resolve_dest, select_image, BuildRequest};
use crate::cache::{CacheEntry, DependencyCache, HttpFetcher};
use crate::cli::args::BuildArgs;
use crate::config::{cache_dir, Config};
use crate::error::XgoResult;
use crate::orchestration::{check_engine, create_runtime, ensure_image, ContainerRuntime};
use crate::ui::{self, CheckSpinner, UiContext};
use crate::workspace::{self, is_local_reference, workspace_roots, WorkspaceResolver};
use tracing::debug;

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config) -> XgoResult<()> {
    let ctx = UiContext::detect();
    let runtime = create_runtime(config);

    let release = args
        .go_release
        .as_deref()
        .unwrap_or(&config.image.default_release);
    let image = select_image(args.image.as_deref(), release, &config.image);
    let cache_dir = cache_dir(config);
    let deps = args.deps.clone().unwrap_or_default();
    debug!("Image: {}, dependency cache: {}", image, cache_dir.display());

    if !args.dry_run {
        check_availability(&ctx, &*runtime, &image).await?;

        let cache = DependencyCache::new(
            cache_dir.clone(),
            Box::new(HttpFetcher::new(ctx.use_fancy_output())),
        );
        cache_dependencies(&ctx, &cache, &deps).await?;
    }

    let dest = resolve_dest(args.dest.as_deref())?;

    let (package, plan) = if is_local_reference(&args.package) {
        let roots = workspace_roots();
        debug!("Workspace roots: {:?}", roots);
        let resolver = WorkspaceResolver::new(roots.clone());
        let local = workspace::resolve_local(&args.package, &roots, &resolver).await?;
        (local.import_path, Some(local.plan))
    } else {
        (args.package.clone(), None)
    };

    let request = BuildRequest {
        package,
        image,
        remote: args.remote.unwrap_or_default(),
        branch: args.branch.unwrap_or_default(),
        pack: args.pkg.unwrap_or_default(),
        deps,
        out_prefix: args.out.unwrap_or_default(),
        dest,
        verbose: args.build_verbose,
        steps: args.build_steps,
        race: args.race,
        targets: args.targets,
    };
    let invocation = assemble_invocation(&request, &cache_dir, plan.as_ref());

    if args.dry_run {
        println!("{}", invocation.command_line(runtime.binary()));
        return Ok(());
    }

    ui::build_started(&ctx, &request.package, &invocation.command_line(runtime.binary()));
    runtime.run(&invocation).await?;

    ui::build_finished(&ctx, &request.dest);
    Ok(())
}

/// Gate on a responsive engine and a locally available build image
async fn check_availability(
    ctx: &UiContext,
    runtime: &dyn ContainerRuntime,
    image: &str,
) -> XgoResult<()> {
    let mut spinner = CheckSpinner::new(ctx);

    spinner.check(&format!("{} installation", runtime.binary()));
    match check_engine(runtime).await {
        Ok(version) => spinner.passed(&format!("{} available: {}", runtime.binary(), version)),
        Err(e) => {
            spinner.failed(&format!("{} not available", runtime.binary()));
            return Err(e);
        }
    }

    spinner.check(&format!("for required image {}", image));
    let result = {
        let mut announce_pull = || spinner.pulling(image);
        ensure_image(runtime, image, &mut announce_pull).await
    };

    match result {
        Ok(true) => ui::image_pulled(ctx, image),
        Ok(false) => spinner.passed(&format!("Image {} found", image)),
        Err(e) => {
            spinner.failed(&format!("Image {} unavailable", image));
            return Err(e);
        }
    }
    Ok(())
}

/// Download every dependency not yet in the cache
async fn cache_dependencies(ctx: &UiContext, cache: &DependencyCache, deps: &str) -> XgoResult<()> {
    let ctx = *ctx;
    let report = move |entry: &CacheEntry| ui::dependency_settled(&ctx, entry);

    let entries = cache.ensure_all(deps, &report).await?;
    debug!("{} dependencies settled in {}", entries.len(), cache.dir().display());
    Ok(())
}
