use crate::config;
use crate::events::AppEvent;
use crate::gui::PADDING;
use crate::gui::canvas::{self, CairoCanvas};
use crate::gui::clock::TickClock;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use orbit::{IndicatorAnimator, IndicatorOptions, ItemVisual, LifecycleAction, Size, paint_items};
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Animator plus the decoded item image, shared with the draw function.
pub struct Indicator {
    pub animator: IndicatorAnimator<TickClock>,
    pub image: Option<Pixbuf>,
}

impl Indicator {
    pub fn new(animator: IndicatorAnimator<TickClock>) -> Self {
        let image = load_image(animator.config().item_image());
        Self { animator, image }
    }

    pub fn reload_image(&mut self) {
        self.image = load_image(self.animator.config().item_image());
    }

    /// Side length of the drawing area in pixels.
    pub fn extent(&self) -> i32 {
        (self.animator.config().extent() + 2.0 * PADDING).ceil() as i32
    }

    fn draw(&mut self, cr: &cairo::Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let center = self.animator.center();
        let backdrop_radius = self.animator.config().extent() / 2.0 + PADDING / 2.0;
        let color = self.animator.config().item_color();
        let visual = ItemVisual::resolve(self.image.as_ref(), color);

        let Some(items) = self.animator.on_frame() else {
            return Ok(());
        };

        canvas::draw_backdrop(cr, center, backdrop_radius, colors.backdrop)?;
        paint_items(&mut CairoCanvas::new(cr), items, visual)
    }
}

fn load_image(path: Option<&Path>) -> Option<Pixbuf> {
    let path = path?;
    Pixbuf::from_file(path)
        .map_err(|e| {
            log::warn!(
                "Failed to load item image '{}', falling back to color: {}",
                path.display(),
                e
            )
        })
        .ok()
}

pub struct AppModel {
    pub indicator: Rc<RefCell<Indicator>>,
    pub visible: bool,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Stop,
    Toggle,
    Quit,
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Start => AppMsg::Start,
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::Toggle => AppMsg::Toggle,
            AppEvent::Quit => AppMsg::Quit,
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (IndicatorOptions, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Whirl"),
            #[watch]
            set_visible: model.visible,
            add_css_class: "whirl-window",
            set_decorated: false,
            set_resizable: false,

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_content_width: extent,
                set_content_height: extent,
                add_css_class: "whirl-drawing-area",

                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, _, _| {
                        sender.input(AppMsg::Toggle);
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (options, rx) = init;

        theme::load_css();
        window::init_layer_shell(&root);

        let drawing_area = gtk::DrawingArea::default();
        let mut animator = IndicatorAnimator::new(TickClock::new(&drawing_area));
        if let Err(e) = animator.configure(options) {
            log::error!("Invalid configuration, using defaults: {}", e);
        }

        let indicator = Indicator::new(animator);
        let extent = indicator.extent();
        let model = AppModel {
            visible: indicator.animator.is_visible(),
            indicator: Rc::new(RefCell::new(indicator)),
            drawing_area: drawing_area.clone(),
        };

        let drawing_area = &model.drawing_area;
        let widgets = view_output!();

        let state_draw = model.indicator.clone();
        drawing_area.set_draw_func(move |drawing_area, cr, _, _| {
            let style_context = drawing_area.style_context();
            let colors = ThemeColors::from_context(&style_context);
            if let Err(e) = state_draw.borrow_mut().draw(cr, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        let state_resize = model.indicator.clone();
        drawing_area.connect_resize(move |drawing_area, width, height| {
            let action = state_resize
                .borrow_mut()
                .animator
                .layout(Size::new(width as f64, height as f64));
            if action.should_redraw {
                drawing_area.queue_draw();
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        // relm4 presents the root after init; honour hide_when_stopped at launch
        if !model.visible {
            let root = root.clone();
            glib::idle_add_local_once(move || root.set_visible(false));
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => {
                let action = self.indicator.borrow_mut().animator.start_animating();
                self.apply(action);
            }
            AppMsg::Stop => {
                let action = self.indicator.borrow_mut().animator.stop_animating();
                self.apply(action);
            }
            AppMsg::Toggle => {
                let action = {
                    let mut indicator = self.indicator.borrow_mut();
                    if indicator.animator.is_animating() {
                        indicator.animator.stop_animating()
                    } else {
                        indicator.animator.start_animating()
                    }
                };
                self.apply(action);
            }
            AppMsg::Quit => {
                log::info!("Quit requested");
                relm4::main_application().quit();
            }
            AppMsg::ConfigReload => match config::load_options() {
                Ok(options) => self.reconfigure(options),
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

impl AppModel {
    fn apply(&mut self, action: LifecycleAction) {
        if let Some(visible) = action.visibility {
            self.visible = visible;
        }
        if action.should_redraw {
            self.drawing_area.queue_draw();
        }
    }

    fn reconfigure(&mut self, options: IndicatorOptions) {
        let mut indicator = self.indicator.borrow_mut();
        if let Err(e) = indicator.animator.configure(options) {
            log::error!("Rejected configuration, keeping the previous one: {}", e);
            return;
        }

        indicator.reload_image();
        let extent = indicator.extent();
        self.drawing_area.set_content_width(extent);
        self.drawing_area.set_content_height(extent);
        self.visible = indicator.animator.is_visible();
        self.drawing_area.queue_draw();
        log::info!("Configuration reloaded");
    }
}
