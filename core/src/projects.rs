//! Project catalogue and the detail modal.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub live_url: Option<&'static str>,
    pub code_url: Option<&'static str>,
}

pub static PROJECTS: [Project; 3] = [
    Project {
        title: "E-Commerce Platform",
        description: "A modern e-commerce platform featuring real-time inventory management, secure payment processing, and responsive design.",
        image: "assets/images/project1.jpg",
        live_url: Some("https://example.com/project1"),
        code_url: Some("https://github.com/user/project1"),
    },
    Project {
        title: "Portfolio Website",
        description: "A creative portfolio website showcasing scroll-driven animation, a particle cursor trail, and responsive design principles.",
        image: "assets/images/project2.jpg",
        live_url: Some("https://example.com/project2"),
        code_url: Some("https://github.com/user/project2"),
    },
    Project {
        title: "Task Management App",
        description: "A collaborative task management application with real-time updates, drag-and-drop functionality, and team collaboration features.",
        image: "assets/images/project3.jpg",
        live_url: Some("https://example.com/project3"),
        code_url: Some("https://github.com/user/project3"),
    },
];

/// Project at `index`, falling back to the first one.
pub fn project(index: usize) -> &'static Project {
    PROJECTS.get(index).unwrap_or(&PROJECTS[0])
}

impl Project {
    pub fn live_href(&self) -> &'static str {
        self.live_url.unwrap_or("#")
    }

    pub fn code_href(&self) -> &'static str {
        self.code_url.unwrap_or("#")
    }
}

/// Which project, if any, the modal is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModalState {
    open: Option<usize>,
}

impl ModalState {
    pub fn open(&mut self, index: usize) -> &'static Project {
        let index = if index < PROJECTS.len() { index } else { 0 };
        self.open = Some(index);
        project(index)
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn current(&self) -> Option<&'static Project> {
        self.open.map(project)
    }

    /// Escape closes an open modal. Returns whether the key was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Escape" && self.is_open() {
            self.close();
            return true;
        }
        false
    }
}
