//! Page navigation and dialog state for the invitation pages.
//!
//! The pages are not routed: every page is present and only one is visible.
//! `Invitation` holds the view state and `dispatch` turns one UI event into
//! the list of effects the view layer has to perform.

pub const TOTAL_PAGES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvitationEvent {
    ShowPage(usize),
    Key(Key),
    OpenRsvp,
    CloseRsvp,
    SubmissionSucceeded,
    CloseSuccess,
    StartMusic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Rsvp,
    Success,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hide every page and show this one
    ShowPage(usize),
    ScrollToTop,
    /// Visibility of the next/previous buttons
    NavButtons { next: bool, prev: bool },
    OpenDialog(Dialog),
    CloseDialog(Dialog),
    LockScroll,
    UnlockScroll,
    FocusFirstInput,
    ResetForm,
    PlayMusic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    total_pages: usize,
    current_page: usize,
    rsvp_open: bool,
    success_open: bool,
    music_started: bool,
}

impl Default for Invitation {
    fn default() -> Self {
        Self::new(TOTAL_PAGES)
    }
}

impl Invitation {
    /// Start on page 1. A zero page count is treated as a single page.
    pub fn new(total_pages: usize) -> Self {
        Self {
            total_pages: total_pages.max(1),
            current_page: 1,
            rsvp_open: false,
            success_open: false,
            music_started: false,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn is_rsvp_open(&self) -> bool {
        self.rsvp_open
    }

    pub fn is_success_open(&self) -> bool {
        self.success_open
    }

    pub fn music_started(&self) -> bool {
        self.music_started
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Effects needed to render the initial state
    pub fn initial_effects(&self) -> Vec<Effect> {
        self.page_effects()
    }

    pub fn dispatch(&mut self, event: InvitationEvent) -> Vec<Effect> {
        match event {
            InvitationEvent::ShowPage(page) => self.show_page(page),
            InvitationEvent::Key(Key::ArrowLeft) if self.has_prev() => {
                self.show_page(self.current_page - 1)
            }
            InvitationEvent::Key(Key::ArrowRight) if self.has_next() => {
                self.show_page(self.current_page + 1)
            }
            InvitationEvent::Key(Key::Escape) => {
                let mut effects = self.close_rsvp();
                effects.extend(self.close_success());
                effects
            }
            InvitationEvent::Key(_) => Vec::new(),
            InvitationEvent::OpenRsvp => self.open_rsvp(),
            InvitationEvent::CloseRsvp => self.close_rsvp(),
            InvitationEvent::SubmissionSucceeded => {
                self.success_open = true;
                let mut effects = vec![Effect::OpenDialog(Dialog::Success), Effect::LockScroll];
                // success_open is already set, so closing the form keeps the scroll lock
                effects.extend(self.close_rsvp());
                effects
            }
            InvitationEvent::CloseSuccess => self.close_success(),
            InvitationEvent::StartMusic => {
                if self.music_started {
                    Vec::new()
                } else {
                    self.music_started = true;
                    vec![Effect::PlayMusic]
                }
            }
        }
    }

    fn show_page(&mut self, page: usize) -> Vec<Effect> {
        if page == 0 || page > self.total_pages {
            return Vec::new();
        }
        self.current_page = page;
        self.page_effects()
    }

    fn page_effects(&self) -> Vec<Effect> {
        vec![
            Effect::ShowPage(self.current_page),
            Effect::NavButtons {
                next: self.has_next(),
                prev: self.has_prev(),
            },
            Effect::ScrollToTop,
        ]
    }

    fn open_rsvp(&mut self) -> Vec<Effect> {
        if self.rsvp_open {
            return Vec::new();
        }
        self.rsvp_open = true;
        vec![
            Effect::OpenDialog(Dialog::Rsvp),
            Effect::LockScroll,
            Effect::FocusFirstInput,
        ]
    }

    fn close_rsvp(&mut self) -> Vec<Effect> {
        if !self.rsvp_open {
            return Vec::new();
        }
        self.rsvp_open = false;
        let mut effects = vec![Effect::CloseDialog(Dialog::Rsvp)];
        if !self.success_open {
            effects.push(Effect::UnlockScroll);
        }
        effects.push(Effect::ResetForm);
        effects
    }

    fn close_success(&mut self) -> Vec<Effect> {
        if !self.success_open {
            return Vec::new();
        }
        self.success_open = false;
        vec![Effect::CloseDialog(Dialog::Success), Effect::UnlockScroll]
    }
}
