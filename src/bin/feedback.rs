use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use course_feedback_be::client::{
    App, Dashboard, DeleteOutcome, FeedbackApi, FeedbackForm, FeedbackList, FormData,
    HttpFeedbackApi, ListFilters, SubmitOutcome, Tab,
    api::DEFAULT_API_URL,
    list::{CourseFilter, RatingFilter, SortKey},
    render::{render_dashboard, render_form_errors, render_list, render_notice},
};

#[derive(Parser)]
#[command(name = "feedback", about = "Student course feedback client")]
struct Cli {
    /// Base URL of the feedback API.
    #[arg(long, env = "FEEDBACK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Totals, average rating, distribution and the latest entries.
    Dashboard,
    /// Submit new feedback, then show the list.
    Submit {
        #[arg(long, default_value = "")]
        student_name: String,
        #[arg(long, default_value = "")]
        course_code: String,
        #[arg(long, default_value = "")]
        comments: String,
        #[arg(long, default_value = "")]
        rating: String,
    },
    /// Browse feedback with search, filters and sorting.
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "all")]
        rating: RatingFilter,
        #[arg(long, default_value = "all")]
        course: CourseFilter,
        #[arg(long, default_value = "newest")]
        sort: SortKey,
    },
    /// Delete one feedback entry by id.
    Delete {
        id: i32,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

fn confirm_on_stdin(question: &str) -> bool {
    print!("{} [y/N] ", question);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

async fn show_list(api: &dyn FeedbackApi, list: &mut FeedbackList) {
    list.refresh(api).await;
    println!("{}", render_list(list));
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let api = HttpFeedbackApi::new(cli.api_url);
    let mut app = App::new();

    let ok = match cli.command {
        Command::Dashboard => {
            app.select(Tab::Dashboard);
            let mut dashboard = Dashboard::default();
            dashboard.refresh(&api).await;
            println!("{}", render_dashboard(&dashboard.stats));
            true
        }
        Command::Submit {
            student_name,
            course_code,
            comments,
            rating,
        } => {
            app.select(Tab::Submit);
            let mut form = FeedbackForm::with_data(FormData {
                student_name,
                course_code,
                comments,
                rating,
            });

            let outcome = form.submit(&api).await;
            if let Some(message) = &form.message {
                println!("{}", render_notice(message));
            }

            match outcome {
                SubmitOutcome::Submitted(_) => {
                    app.finish_submission().await;
                    show_list(&api, &mut FeedbackList::new()).await;
                    true
                }
                SubmitOutcome::Invalid => {
                    eprint!("{}", render_form_errors(&form));
                    false
                }
                SubmitOutcome::Failed => false,
            }
        }
        Command::List {
            search,
            rating,
            course,
            sort,
        } => {
            app.select(Tab::View);
            let mut list = FeedbackList::new();
            list.filters = ListFilters {
                search,
                rating,
                course,
                sort,
            };
            show_list(&api, &mut list).await;
            list.error.is_none()
        }
        Command::Delete { id, yes } => {
            app.select(Tab::View);
            let mut list = FeedbackList::new();
            let outcome = list
                .delete(&api, id, |question| yes || confirm_on_stdin(question))
                .await;

            match outcome {
                DeleteOutcome::Cancelled => true,
                DeleteOutcome::Deleted => {
                    println!("{}", render_list(&list));
                    true
                }
                DeleteOutcome::Failed => {
                    println!("{}", render_list(&list));
                    false
                }
            }
        }
    };

    if !ok {
        std::process::exit(1);
    }
}
