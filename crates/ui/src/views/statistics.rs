use dioxus::prelude::*;
use tracing::warn;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{StatisticsVm, map_statistics};

#[component]
pub fn StatisticsView() -> Element {
    let ctx = use_context::<AppContext>();
    let statistics = ctx.statistics();

    let resource = use_resource(move || {
        let statistics = statistics.clone();
        async move {
            let stats = statistics.current().await.map_err(|err| {
                warn!(error = %err, "failed to load statistics");
                ViewError::Unknown
            })?;
            Ok::<_, ViewError>(map_statistics(&stats))
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Statistics" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(stats) => rsx! {
                    StatisticsDetails { stats }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn StatisticsDetails(stats: StatisticsVm) -> Element {
    rsx! {
        dl { class: "summary",
            dt { "Quizzes played" }
            dd { "{stats.games_played}" }

            dt { "Record" }
            dd {
                match stats.best_label.as_deref() {
                    Some(label) => rsx! { "{label}" },
                    None => rsx! { "No rounds finished yet" },
                }
            }

            dt { "Average accuracy" }
            dd { "{stats.accuracy_label}" }
        }
    }
}
