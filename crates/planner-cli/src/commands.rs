use anyhow::{Context, Result, bail};
use planner_api::{ClientSettings, PlannerClient};
use planner_cli::render::TerminalRenderer;
use planner_cli::selection::SelectionPlan;
use planner_grid::{PendingBatch, PersistenceApi, PlotDesign, SymbolPalette};
use planner_model::{Link, LinkAction, PlantSearch, PlantlistEntryId, SymbolGlyph};

use crate::cli::{
    LinkArgs, LinkCommand, PlantsCommand, PlotArgs, PlotCommand, SearchArgs, ServerArgs,
    SymbolCommand,
};
use crate::summary::{print_batch_report, print_catalog_page, print_connections, print_palette};

/// Result of a command that writes cells: whether every cell was saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    PartialFailure,
}

pub fn run_plot(server: &ServerArgs, command: &PlotCommand) -> Result<Outcome> {
    let client = build_client(server)?;
    block_on(plot(&client, command))
}

pub fn run_link(server: &ServerArgs, command: &LinkCommand) -> Result<()> {
    let client = build_client(server)?;
    block_on(link(&client, command))
}

pub fn run_plants(server: &ServerArgs, command: &PlantsCommand) -> Result<()> {
    let client = build_client(server)?;
    block_on(plants(&client, command))
}

pub fn run_symbol(server: &ServerArgs, command: &SymbolCommand) -> Result<()> {
    let client = build_client(server)?;
    block_on(symbol(&client, command))
}

async fn plot(client: &PlannerClient, command: &PlotCommand) -> Result<Outcome> {
    match command {
        PlotCommand::Show(args) => {
            let design = load_design(client, args).await?;
            println!("{}", draw(&design));
            Ok(Outcome::Complete)
        }
        PlotCommand::Paint(args) => {
            let mut design = load_design(client, &args.plot).await?;
            select(&mut design, &args.selection.plan())?;
            let glyph = match args.plantlist {
                Some(plantlist) => {
                    let palette = design
                        .palette(client, plantlist)
                        .await
                        .with_context(|| format!("load symbols of plant list {plantlist}"))?;
                    entry_glyph(&palette, args.entry)
                        .with_context(|| format!("check plant list {plantlist}"))?
                }
                None => SymbolGlyph::default(),
            };
            let batch = design.apply_symbol(&glyph, args.entry);
            finish(client, &design, batch, "Painted").await
        }
        PlotCommand::Clear(args) => {
            let mut design = load_design(client, &args.plot).await?;
            select(&mut design, &args.selection.plan())?;
            let batch = design.remove_selected_symbols();
            finish(client, &design, batch, "Cleared").await
        }
        PlotCommand::Palette { plantlist } => {
            let entries = client
                .fetch_plantlist_assignable_entries(*plantlist)
                .await
                .with_context(|| format!("load plant list {plantlist}"))?;
            print_palette(&SymbolPalette::new(entries));
            Ok(Outcome::Complete)
        }
    }
}

async fn link(client: &PlannerClient, command: &LinkCommand) -> Result<()> {
    match command {
        LinkCommand::Add(args) => update_links(client, args, LinkAction::Add).await,
        LinkCommand::Remove(args) => update_links(client, args, LinkAction::Remove).await,
        LinkCommand::List {
            primary,
            id,
            secondary,
        } => {
            let state = client
                .connections(*primary, *id, *secondary)
                .await
                .with_context(|| format!("load {} of {primary} {id}", secondary.plural()))?;
            print_connections(*primary, *id, *secondary, &state);
            Ok(())
        }
    }
}

async fn plants(client: &PlannerClient, command: &PlantsCommand) -> Result<()> {
    let page = match command {
        PlantsCommand::Search(args) => {
            let search = build_search(args)?;
            client.search_plants(&search).await.context("search plants")?
        }
        PlantsCommand::Page { link } => client.paginate(link).await.context("load result page")?,
    };
    print_catalog_page(&page);
    Ok(())
}

async fn symbol(client: &PlannerClient, command: &SymbolCommand) -> Result<()> {
    let SymbolCommand::Set {
        plantlist,
        plant,
        icon,
        color,
    } = command;
    let glyph = SymbolGlyph::new(icon.trim(), color.trim());
    let stored = client
        .set_plant_symbol(*plantlist, *plant, &glyph)
        .await
        .with_context(|| format!("set symbol of plant {plant}"))?;
    tracing::info!(%plantlist, %plant, "symbol set to {stored}");
    println!("Plant {plant} on plant list {plantlist} now shows {stored}");
    Ok(())
}

/// Settings file, then environment, then command-line flags.
fn build_client(server: &ServerArgs) -> Result<PlannerClient> {
    let mut settings =
        ClientSettings::load(server.config.as_deref()).context("load client settings")?;
    if let Some(url) = &server.url {
        settings.base_url = url.trim().to_string();
    }
    if let Some(session) = &server.session {
        settings.session = Some(session.trim().to_string());
    }
    if let Some(timeout) = server.timeout_secs {
        settings.timeout_secs = timeout;
    }
    if settings.session.is_none() {
        tracing::warn!("no session cookie configured; the server will refuse most requests");
    }
    PlannerClient::new(settings).context("create client")
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("start async runtime")?;
    runtime.block_on(future)
}

async fn load_design(
    client: &PlannerClient,
    args: &PlotArgs,
) -> Result<PlotDesign<TerminalRenderer>> {
    let mut design = PlotDesign::new(args.plot, args.size, TerminalRenderer::new());
    let changed = design
        .refresh(client)
        .await
        .with_context(|| format!("load plot {}", args.plot))?;
    tracing::info!(plot = %args.plot, dims = %args.size, "{changed} cells hold a symbol");
    Ok(design)
}

fn entry_glyph(palette: &SymbolPalette, entry: PlantlistEntryId) -> Result<SymbolGlyph> {
    match palette.get(entry) {
        Some(found) => Ok(found.glyph.clone()),
        None => bail!("entry {entry} is not on this plant list"),
    }
}

fn select(design: &mut PlotDesign<TerminalRenderer>, plan: &SelectionPlan) -> Result<()> {
    if plan.is_empty() {
        bail!("nothing selected: pass --all, --row, --col or --cell");
    }
    plan.apply(design).context("select cells")?;
    if design.selection().is_empty() {
        bail!("the toggles cancel out and leave no cell selected");
    }
    Ok(())
}

async fn finish(
    client: &PlannerClient,
    design: &PlotDesign<TerminalRenderer>,
    batch: PendingBatch,
    action: &str,
) -> Result<Outcome> {
    let report = batch.dispatch(client).await;
    println!("{}", draw(design));
    print_batch_report(action, &report);
    Ok(if report.is_success() {
        Outcome::Complete
    } else {
        Outcome::PartialFailure
    })
}

fn draw(design: &PlotDesign<TerminalRenderer>) -> String {
    design.renderer().draw(design.grid(), design.selection())
}

async fn update_links(client: &PlannerClient, args: &LinkArgs, action: LinkAction) -> Result<()> {
    let mut state = client
        .connections(args.primary, args.primary_id, args.secondary)
        .await
        .with_context(|| {
            format!(
                "load {} of {} {}",
                args.secondary.plural(),
                args.primary,
                args.primary_id
            )
        })?;

    let mut accepted = Vec::with_capacity(args.secondary_ids.len());
    let mut failed = None;
    for &secondary_id in &args.secondary_ids {
        let link = Link::resolve(args.primary, args.primary_id, args.secondary, secondary_id)
            .context("invalid link")?;
        match client.update_link(link, action).await {
            Ok(reply) => {
                tracing::debug!("{link}: {reply}");
                println!("{} {link}", action_label(action));
                accepted.push(secondary_id);
            }
            Err(error) => {
                tracing::warn!("{link} not updated: {error}");
                failed = Some(anyhow::Error::new(error).context(format!("update {link}")));
                break;
            }
        }
    }

    state.apply(action, &accepted);
    print_connections(args.primary, args.primary_id, args.secondary, &state);
    match failed {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

const fn action_label(action: LinkAction) -> &'static str {
    match action {
        LinkAction::Add => "Linked",
        LinkAction::Remove => "Unlinked",
    }
}

fn build_search(args: &SearchArgs) -> Result<PlantSearch> {
    let mut search = PlantSearch::new()
        .vegetable(args.vegetable)
        .evergreen(args.evergreen);
    if let Some(query) = &args.query {
        search = search.query(query);
    }
    for (filter, value) in &args.filters {
        search = search
            .filter(*filter, value)
            .with_context(|| format!("invalid --filter {}={value}", filter.field()))?;
    }
    Ok(search)
}
