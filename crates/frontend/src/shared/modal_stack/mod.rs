//! Стек модальных окон
//!
//! Детальные формы открываются поверх списка через `ModalStackService::open`.
//! Escape и клик по подложке закрывают только верхнее окно.

use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use std::sync::Arc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::KeyboardEvent;

type ModalBuilder = Arc<dyn Fn(ModalHandle) -> AnyView + Send + Sync>;

#[derive(Clone)]
struct ModalEntry {
    id: u64,
    width: &'static str,
    builder: ModalBuilder,
}

/// Позволяет окну закрыть себя из обработчиков событий
#[derive(Clone, Copy)]
pub struct ModalHandle {
    id: u64,
    svc: ModalStackService,
}

impl ModalHandle {
    pub fn close(&self) {
        self.svc.close_deferred(self.id);
    }
}

#[derive(Clone, Copy)]
pub struct ModalStackService {
    stack: RwSignal<Vec<ModalEntry>>,
    next_id: StoredValue<u64>,
}

impl ModalStackService {
    pub fn new() -> Self {
        Self {
            stack: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(1),
        }
    }

    pub fn is_open(&self) -> bool {
        self.stack.with(|s| !s.is_empty())
    }

    /// Открыть окно заданной ширины (CSS-значение, например `"720px"`)
    pub fn open<F>(&self, width: &'static str, builder: F) -> ModalHandle
    where
        F: Fn(ModalHandle) -> AnyView + Send + Sync + 'static,
    {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);

        self.stack.update(|s| {
            s.push(ModalEntry {
                id,
                width,
                builder: Arc::new(builder),
            })
        });

        ModalHandle { id, svc: *self }
    }

    pub fn close(&self, id: u64) {
        self.stack.update(|s| s.retain(|e| e.id != id));
    }

    /// Закрытие на следующем тике: окно не удаляется во время обработки
    /// события, которое его закрывает
    pub fn close_deferred(&self, id: u64) {
        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            svc.close(id);
        });
    }

    fn close_top_deferred(&self) {
        if let Some(id) = self.stack.with_untracked(|s| s.last().map(|e| e.id)) {
            self.close_deferred(id);
        }
    }
}

impl Default for ModalStackService {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
fn ModalFrame(z_index: i32, width: &'static str, on_close: Callback<()>, children: Children) -> impl IntoView {
    let pressed_on_overlay = RwSignal::new(false);

    let is_overlay = |ev: &ev::MouseEvent| match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    };

    // Закрываем, только если и нажатие, и отпускание были на подложке
    view! {
        <div
            class="modal-overlay"
            style=format!("z-index: {z_index};")
            on:mousedown=move |ev| pressed_on_overlay.set(is_overlay(&ev))
            on:click=move |ev| {
                if pressed_on_overlay.get_untracked() && is_overlay(&ev) {
                    on_close.run(());
                }
                pressed_on_overlay.set(false);
            }
        >
            <div
                class="modal"
                style=format!("position: relative; width: min({width}, 95vw); max-height: 90vh; overflow: auto;")
                on:click=|ev| ev.stop_propagation()
            >
                {children()}
            </div>
        </div>
    }
}

/// Рендерит стек окон. Монтируется один раз в корне приложения.
#[component]
pub fn ModalHost() -> impl IntoView {
    let svc = use_context::<ModalStackService>()
        .expect("ModalStackService not provided in context (provide it in app root)");

    let on_keydown = Closure::wrap(Box::new(move |event: web_sys::Event| {
        if let Some(key_event) = event.dyn_ref::<KeyboardEvent>() {
            if key_event.key() == "Escape" {
                svc.close_top_deferred();
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web_sys::window() {
        let _ = window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
    }
    // Хост живёт всё время работы приложения
    on_keydown.forget();

    view! {
        <Show when=move || svc.is_open()>
            <For
                each={move || svc.stack.get().into_iter().enumerate().collect::<Vec<_>>()}
                key={|(_, entry)| entry.id}
                children=move |(idx, entry)| {
                    let handle = ModalHandle { id: entry.id, svc };
                    let on_close = Callback::new(move |_| handle.close());
                    view! {
                        <ModalFrame z_index=1000 + idx as i32 width=entry.width on_close=on_close>
                            {(entry.builder)(handle)}
                        </ModalFrame>
                    }
                }
            />
        </Show>
    }
}
