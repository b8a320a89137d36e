use std::time::Duration;

use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdMic, LdMicOff, LdVideo, LdVideoOff};
use dioxus_free_icons::Icon;
use shared_types::insights::{Insight, InsightFeed, Sentiment};
use shared_types::media::{MediaKind, MediaSession};
use shared_types::FeatureFlags;
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonVariant, Card, CardContent, CardHeader,
    CardTitle, EmptyState, PageHeader, ProgressBar, ToastOptions,
};

use crate::media::{BrowserMedia, PREVIEW_ELEMENT_ID};

async fn sleep(period: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(period).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(period).await;
}

fn sentiment_badge(sentiment: Sentiment) -> BadgeVariant {
    match sentiment {
        Sentiment::Positive => BadgeVariant::Success,
        Sentiment::Neutral => BadgeVariant::Secondary,
        Sentiment::Anxious => BadgeVariant::Warning,
        Sentiment::Frustrated => BadgeVariant::Destructive,
    }
}

/// Browser video session with camera and microphone toggles and the
/// simulated insight panel.
#[component]
pub fn VideoSession() -> Element {
    let flags: FeatureFlags = use_context();
    let toast = use_toast();
    let mut media = use_signal(MediaSession::new);
    let mut switching = use_signal(|| Option::<MediaKind>::None);
    let mut insight = use_signal(|| Option::<Insight>::None);

    // One ticker per mount; cancelled below when the view goes away.
    let ticker = use_hook(|| {
        flags.simulated_insights.then(|| {
            spawn(async move {
                let feed = InsightFeed::default();
                loop {
                    sleep(feed.interval).await;
                    let next = feed.next(&mut rand::thread_rng());
                    insight.set(Some(next));
                }
            })
        })
    });

    use_drop(move || {
        if let Some(task) = ticker {
            task.cancel();
        }
        let mut session = media.peek().clone();
        session.shutdown(&BrowserMedia);
        // A pending toggle's task dies with the scope; its stream only lives on the JS side.
        if switching.peek().is_some() {
            BrowserMedia.release_all();
        }
    });

    let mut toggle = move |kind: MediaKind| {
        if switching.peek().is_some() {
            return;
        }
        switching.set(Some(kind));
        spawn(async move {
            let mut session = media.peek().clone();
            match session.toggle(&BrowserMedia, kind).await {
                Ok(on) => tracing::debug!(%kind, on, "Media toggled"),
                Err(e) => {
                    tracing::warn!(%kind, error = %e, "Media acquisition failed");
                    toast.error(e.to_string(), ToastOptions::new());
                }
            }
            media.set(session);
            switching.set(None);
        });
    };

    let camera_on = media.read().is_on(MediaKind::Camera);
    let mic_on = media.read().is_on(MediaKind::Microphone);
    let busy = switching();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./video_session.css") }

        div { class: "page",
            PageHeader {
                title: "Video Session",
                subtitle: "Meet with your care team in the browser".to_string(),
            }

            div { class: "session-layout",
                div { class: "session-stage",
                    video {
                        id: PREVIEW_ELEMENT_ID,
                        class: if camera_on { "session-video" } else { "session-video hidden" },
                        autoplay: true,
                        muted: true,
                        "playsinline": "true",
                    }
                    if !camera_on {
                        div { class: "session-placeholder", "Camera is off" }
                    }

                    div { class: "session-controls",
                        Button {
                            variant: if camera_on { ButtonVariant::Primary } else { ButtonVariant::Outline },
                            loading: busy == Some(MediaKind::Camera),
                            onclick: move |_| toggle(MediaKind::Camera),
                            if camera_on {
                                Icon::<LdVideo> { icon: LdVideo, width: 18, height: 18 }
                                "Camera on"
                            } else {
                                Icon::<LdVideoOff> { icon: LdVideoOff, width: 18, height: 18 }
                                "Camera off"
                            }
                        }
                        Button {
                            variant: if mic_on { ButtonVariant::Primary } else { ButtonVariant::Outline },
                            loading: busy == Some(MediaKind::Microphone),
                            onclick: move |_| toggle(MediaKind::Microphone),
                            if mic_on {
                                Icon::<LdMic> { icon: LdMic, width: 18, height: 18 }
                                "Mic on"
                            } else {
                                Icon::<LdMicOff> { icon: LdMicOff, width: 18, height: 18 }
                                "Mic off"
                            }
                        }
                    }
                }

                if flags.simulated_insights {
                    InsightPanel { insight: insight() }
                }
            }
        }
    }
}

#[component]
fn InsightPanel(insight: Option<Insight>) -> Element {
    rsx! {
        Card { class: "session-insights",
            CardHeader { CardTitle { "Session insights" } }
            CardContent {
                match insight {
                    None => rsx! {
                        EmptyState {
                            title: "Waiting for the first reading",
                            message: "Insights refresh every few seconds.".to_string(),
                        }
                    },
                    Some(reading) => rsx! {
                        div { class: "session-insight-row",
                            span { "Mood" }
                            Badge { variant: sentiment_badge(reading.sentiment), "{reading.sentiment.label()}" }
                        }
                        div { class: "session-insight-row",
                            span { "Engagement" }
                            span { "{reading.engagement.label()}" }
                        }
                        ProgressBar {
                            value: reading.engagement_score,
                            label: format!("{}%", reading.engagement_score),
                        }
                        p { class: "session-suggestion", "{reading.suggestion}" }
                    },
                }
                p { class: "page-muted", "Simulated readings for demonstration." }
            }
        }
    }
}
