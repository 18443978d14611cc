use std::rc::Rc;

use web_sys::KeyboardEvent;
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::hooks::use_deadline;
use crate::config::SiteConfig;
use crate::state::notification::{
    Notification, NotificationEvent, NotificationId, NotificationManager, Notifier, ToastRequest,
};
use crate::utils::timing;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastCenter {
    manager: NotificationManager,
}

impl ToastCenter {
    fn from_config(config: &SiteConfig) -> Self {
        Self {
            manager: NotificationManager::new(config.notification_duration_ms, config.notification_exit_ms),
        }
    }
}

impl Reducible for ToastCenter {
    type Action = NotificationEvent;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut manager = self.manager.clone();
        manager.handle(action, timing::now());
        Rc::new(Self { manager })
    }
}

pub type Toasts = UseReducerHandle<ToastCenter>;

/// Forwards toasts into the page's stack; logs them if there is no stack.
pub struct ToastDispatcher(Option<Toasts>);

impl ToastDispatcher {
    pub fn new(toasts: Option<Toasts>) -> Self {
        Self(toasts)
    }
}

impl Notifier for ToastDispatcher {
    fn notify(&mut self, request: ToastRequest) {
        match &self.0 {
            Some(toasts) => toasts.dispatch(NotificationEvent::Notify(request)),
            None => log::debug!("no toast host for: {}", request.message),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let config = use_context::<Rc<SiteConfig>>().unwrap_or_default();
    let toasts = use_reducer(move || ToastCenter::from_config(&config));

    {
        let toasts = toasts.clone();
        use_deadline(toasts.manager.next_deadline(), move |_| {
            toasts.dispatch(NotificationEvent::Tick)
        });
    }

    {
        let toasts = toasts.clone();
        use_event_with_window("keydown", move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                toasts.dispatch(NotificationEvent::EscapePressed);
            }
        });
    }

    let on_close = {
        let toasts = toasts.clone();
        Callback::from(move |id: NotificationId| toasts.dispatch(NotificationEvent::Dismiss(id)))
    };

    html! {
        <ContextProvider<Toasts> context={toasts.clone()}>
            { props.children.clone() }
            <div class="notification-stack" aria-live="polite">
                { for toasts.manager.rendered().iter().map(|n| html! {
                    <Toast key={n.id} notification={n.clone()} on_close={on_close.clone()} />
                }) }
            </div>
        </ContextProvider<Toasts>>
    }
}

#[derive(Properties, PartialEq)]
struct ToastProps {
    notification: Notification,
    on_close: Callback<NotificationId>,
}

#[function_component(Toast)]
fn toast(props: &ToastProps) -> Html {
    let n = &props.notification;
    let onclick = {
        let on_close = props.on_close.clone();
        let id = n.id;
        Callback::from(move |_: MouseEvent| on_close.emit(id))
    };

    html! {
        <div class={classes!(
            "notification",
            format!("notification-{}", n.severity),
            n.is_exiting().then_some("notification-exiting"),
        )}>
            <style>
                {r#"
                    @keyframes slideInRight {
                        from { transform: translateX(120%); opacity: 0; }
                        to { transform: translateX(0); opacity: 1; }
                    }
                    @keyframes slideOutRight {
                        from { transform: translateX(0); opacity: 1; }
                        to { transform: translateX(120%); opacity: 0; }
                    }
                    .notification-stack {
                        position: fixed;
                        top: 90px;
                        right: 20px;
                        z-index: 10000;
                        display: flex;
                        flex-direction: column;
                        gap: 10px;
                    }
                    .notification {
                        display: flex;
                        align-items: center;
                        gap: 12px;
                        min-width: 300px;
                        max-width: 420px;
                        padding: 16px 20px;
                        border-radius: 12px;
                        color: #fff;
                        box-shadow: 0 10px 30px rgba(0, 0, 0, 0.2);
                        animation: slideInRight 0.3s ease forwards;
                    }
                    .notification-exiting {
                        animation: slideOutRight 0.3s ease forwards;
                    }
                    .notification-success { background: linear-gradient(135deg, #10b981, #059669); }
                    .notification-error { background: linear-gradient(135deg, #ef4444, #dc2626); }
                    .notification-warning { background: linear-gradient(135deg, #f59e0b, #d97706); }
                    .notification-info { background: linear-gradient(135deg, #3b82f6, #2563eb); }
                    .notification-content { flex: 1; }
                    .notification button {
                        background: none;
                        border: none;
                        color: inherit;
                        cursor: pointer;
                        opacity: 0.8;
                    }
                "#}
            </style>
            <div class="notification-icon">
                <i class={n.severity.icon_class()}></i>
            </div>
            <div class="notification-content">
                <span>{ n.message.clone() }</span>
            </div>
            <button {onclick} aria-label="Close notification">
                <i class="fas fa-times"></i>
            </button>
        </div>
    }
}
