use crate::config::Appearance;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::wheel::{self, WheelScene};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use whirl::driver::{self, Surface, Tick};
use whirl::{Animator, Choice, SpinTicket, ThreadSpeed};

pub type Wheel = Animator<ThreadSpeed>;

pub struct AppModel {
    pub wheel: Rc<RefCell<Wheel>>,
    pub scene: Rc<RefCell<WheelScene>>,
    pub appearance: Appearance,
    pub result: ResultLine,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Start,
    Pointer(SpinTicket, f64),
    Resolved(SpinTicket, Choice),
    Quit,
}

/// The line under the wheel. Empty while a spin is running.
#[derive(Debug, Default)]
pub struct ResultLine {
    text: String,
}

impl ResultLine {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn start(&mut self) {
        self.text.clear();
    }

    /// Shows `text` unless `ticket` was superseded by a later spin while its message waited.
    pub fn resolve(&mut self, latest: Option<SpinTicket>, ticket: SpinTicket, text: String) {
        if latest == Some(ticket) {
            self.text = text;
        } else {
            log::debug!("Dropping result of a superseded spin");
        }
    }
}

/// Forwards animator output into the component's message queue.
struct Host<'a>(&'a ComponentSender<AppModel>);

impl Surface for Host<'_> {
    fn draw_pointer(&mut self, ticket: SpinTicket, angle: f64) {
        self.0.input(AppMsg::Pointer(ticket, angle));
    }

    fn show_result(&mut self, ticket: SpinTicket, choice: &Choice) {
        self.0.input(AppMsg::Resolved(ticket, choice.clone()));
    }
}

/// Arms a one-shot timer for the next step. Each step arms the one after it, until the spin
/// resolves or is superseded.
fn schedule_step(
    wheel: Rc<RefCell<Wheel>>,
    ticket: SpinTicket,
    cadence: Duration,
    sender: ComponentSender<AppModel>,
) {
    glib::timeout_add_local_once(cadence, move || {
        let next = driver::tick(&mut *wheel.borrow_mut(), ticket, &mut Host(&sender));
        if next == Tick::Reschedule {
            schedule_step(wheel, ticket, cadence, sender);
        }
    });
}

fn schedule_force_stop(
    wheel: Rc<RefCell<Wheel>>,
    ticket: SpinTicket,
    after: Duration,
    sender: ComponentSender<AppModel>,
) {
    glib::timeout_add_local_once(after, move || {
        driver::force_stop(&mut *wheel.borrow_mut(), ticket, &mut Host(&sender));
    });
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Wheel, Appearance);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Tonight"),
            set_resizable: true,
            add_css_class: "tonight-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Quit);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::space | gtk::gdk::Key::Return | gtk::gdk::Key::KP_Enter => {
                            sender.input(AppMsg::Start);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 10,
                set_margin_all: 10,

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: model.appearance.width,
                    set_content_height: model.appearance.height,
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "tonight-wheel",
                },

                gtk::Label {
                    #[watch]
                    set_label: model.result.text(),
                    add_css_class: "tonight-result",
                },

                gtk::Button {
                    set_label: "Start",
                    set_halign: gtk::Align::Center,
                    add_css_class: "tonight-start",
                    connect_clicked => AppMsg::Start,
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (animator, appearance) = init;

        theme::load_css();

        let scene = WheelScene::new(
            animator.choices(),
            appearance.anchor,
            appearance.font.clone(),
        );
        let scene = Rc::new(RefCell::new(scene));

        let model = AppModel {
            wheel: Rc::new(RefCell::new(animator)),
            scene: scene.clone(),
            appearance,
            result: ResultLine::default(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = wheel::draw(cr, &scene.borrow(), &colors, width, height) {
                    log::error!("Drawing error: {}", e);
                }
            });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Start => {
                self.result.start();

                let spun = self.wheel.borrow_mut().spin();
                let ticket = match spun {
                    Ok(t) => t,
                    Err(e) => {
                        log::error!("Cannot spin: {}", e);
                        return;
                    }
                };

                let physics = *self.wheel.borrow().physics();
                schedule_step(self.wheel.clone(), ticket, physics.cadence, sender.clone());
                schedule_force_stop(self.wheel.clone(), ticket, physics.stop_after, sender);
            }
            AppMsg::Pointer(ticket, angle) => {
                if self.wheel.borrow().latest_ticket() != Some(ticket) {
                    return;
                }
                self.scene.borrow_mut().pointer = angle;
                self.drawing_area.queue_draw();
            }
            AppMsg::Resolved(ticket, choice) => {
                let latest = self.wheel.borrow().latest_ticket();
                let text = self.appearance.result_text(&choice.name);
                self.result.resolve(latest, ticket, text);
            }
            AppMsg::Quit => self.root.close(),
        }
    }
}
