use clap::{Parser, Subcommand};

use dashgrid::Result;
use dashgrid::config::Config;
use dashgrid::prefs::{self, FilePreferences, PreferenceStore};
use dashgrid::render;
use dashgrid::resolve::DashboardResolver;
use dashgrid::source::{DashboardId, JsonDataSource, WidgetId};
use dashgrid::view::{self, PageOutcome, ViewRequest};

use tracing::info;

#[derive(Parser)]
#[command(name = "dashgrid")]
#[command(about = "Dashboard widget composition", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and compose a dashboard into a grid widget view.
    View {
        /// Dashboards exported from the data API (JSON list).
        #[arg(long)]
        data: String,

        #[arg(long)]
        prefs: String,

        #[arg(long)]
        user: String,

        #[arg(long)]
        dashboard: Option<u64>,

        #[arg(long)]
        fullscreen: bool,

        /// Write the view here instead of stdout.
        #[arg(short = 'o', long)]
        out: Option<String>,
    },

    /// List dashboards. Disables the default dashboard fallback for the user.
    List {
        #[arg(long)]
        data: String,

        #[arg(long)]
        prefs: String,

        #[arg(long)]
        user: String,
    },

    /// Store a refresh interval override for one widget.
    SetRefresh {
        #[arg(long)]
        prefs: String,

        #[arg(long)]
        user: String,

        #[arg(long)]
        widget: u64,

        #[arg(long)]
        seconds: u32,
    },

    /// Report refresh overrides whose widget no longer exists.
    Orphans {
        #[arg(long)]
        data: String,

        #[arg(long)]
        prefs: String,

        #[arg(long)]
        user: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    dashgrid::logging::init(config.debug);

    match cli.cmd {
        Commands::View {
            data,
            prefs: prefs_path,
            user,
            dashboard,
            fullscreen,
            out,
        } => {
            let registry = config.registry()?;
            let source = JsonDataSource::load(&data)?;
            let mut store = FilePreferences::open(prefs_path, &user)?;
            let resolver = DashboardResolver::new(config.default_dashboard());

            let request = ViewRequest {
                dashboard: dashboard.map(DashboardId),
                fullscreen,
            };

            match view::build_dashboard_view(request, &registry, &resolver, &mut store, &source)? {
                PageOutcome::View(view) => {
                    let json = render::render_json_view(&view)?;
                    match out {
                        Some(path) => {
                            std::fs::write(&path, json)?;
                            println!("Wrote {}", path);
                        }
                        None => print!("{}", json),
                    }
                }
                PageOutcome::RedirectToList => {
                    info!(%user, "no dashboard to show");
                    println!("No dashboard selected; open the dashboard list.");
                }
            }
        }

        Commands::List {
            data,
            prefs: prefs_path,
            user,
        } => {
            let source = JsonDataSource::load(&data)?;
            let mut store = FilePreferences::open(prefs_path, &user)?;

            for dashboard in source.dashboards() {
                println!(
                    "{}\t{}\t{} widgets",
                    dashboard.id,
                    dashboard.name,
                    dashboard.widgets.len()
                );
            }
            prefs::mark_list_opened(&mut store)?;
        }

        Commands::SetRefresh {
            prefs: prefs_path,
            user,
            widget,
            seconds,
        } => {
            let mut store = FilePreferences::open(prefs_path, &user)?;
            prefs::set_widget_refresh_rate(&mut store, WidgetId(widget), seconds)?;
            println!("widget {} refreshes every {}s", widget, seconds);
        }

        Commands::Orphans {
            data,
            prefs: prefs_path,
            user,
        } => {
            let source = JsonDataSource::load(&data)?;
            let store = FilePreferences::open(prefs_path, &user)?;

            let orphans = prefs::orphans::find_orphaned_refresh_overrides(
                &store.keys()?,
                &source.widget_ids(),
            )?;
            if orphans.is_empty() {
                println!("No orphaned refresh overrides for {}", user);
            }
            for orphan in orphans {
                println!("{}\twidget {} no longer exists", orphan.key, orphan.widget);
            }
        }
    }

    Ok(())
}
