use leptos::{component, view, IntoView, ReadSignal, SignalGet, SignalUpdate, WriteSignal, spawn_local};
use std::sync::atomic::{AtomicU64, Ordering};
use crate::session::{Notice, NoticeLevel};

static NEXT_TOAST_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

impl Toast {
    #[must_use]
    pub fn new(id: u64, notice: Notice) -> Self {
        Self { id, notice }
    }

    fn class(&self) -> &'static str {
        match self.notice.level {
            NoticeLevel::Success => "toast toast-visible toast-success",
            NoticeLevel::Warning => "toast toast-visible toast-warning",
            NoticeLevel::Error => "toast toast-visible toast-error",
            NoticeLevel::Info => "toast toast-visible toast-info",
        }
    }
}

/// Push a notice onto the stack, dropping the oldest beyond `max_toasts`,
/// and schedule its dismissal
pub fn push_toast(set_toasts: WriteSignal<Vec<Toast>>, notice: Notice, max_toasts: usize, duration_ms: u32) {
    let id = NEXT_TOAST_ID.fetch_add(1, Ordering::Relaxed);
    set_toasts.update(|toasts| {
        toasts.push(Toast::new(id, notice));
        let overflow = toasts.len().saturating_sub(max_toasts);
        toasts.drain(..overflow);
    });

    spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(duration_ms).await;
        set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
    });
}

#[component]
#[must_use]
pub fn ToastStack(toasts: ReadSignal<Vec<Toast>>) -> impl IntoView {
    view! {
        <div class="toast-stack">
            {move || {
                toasts.get().into_iter().map(|toast| {
                    let class = toast.class();
                    view! {
                        <div class=class>
                            {toast.notice.message}
                        </div>
                    }
                }).collect::<Vec<_>>()
            }}
        </div>
    }
}
