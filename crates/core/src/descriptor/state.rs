//! Element vocabulary of `ejb-jar.xml` and the parse-state hierarchy built on it.

use serde::Serialize;

/// Element names the state machine reacts to. Anything else is only relevant
/// for the text it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorTag {
    EjbJar,
    EnterpriseBeans,
    Session,
    Entity,
    MessageDriven,
    EjbRef,
    EjbName,
    Home,
    Remote,
    Local,
    LocalHome,
    EjbClass,
    PrimKeyClass,
}

impl DescriptorTag {
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "ejb-jar" => Self::EjbJar,
            "enterprise-beans" => Self::EnterpriseBeans,
            "session" => Self::Session,
            "entity" => Self::Entity,
            "message-driven" => Self::MessageDriven,
            "ejb-ref" => Self::EjbRef,
            "ejb-name" => Self::EjbName,
            "home" => Self::Home,
            "remote" => Self::Remote,
            "local" => Self::Local,
            "local-home" => Self::LocalHome,
            "ejb-class" => Self::EjbClass,
            "prim-key-class" => Self::PrimKeyClass,
            _ => return None,
        };
        Some(tag)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EjbJar => "ejb-jar",
            Self::EnterpriseBeans => "enterprise-beans",
            Self::Session => "session",
            Self::Entity => "entity",
            Self::MessageDriven => "message-driven",
            Self::EjbRef => "ejb-ref",
            Self::EjbName => "ejb-name",
            Self::Home => "home",
            Self::Remote => "remote",
            Self::Local => "local",
            Self::LocalHome => "local-home",
            Self::EjbClass => "ejb-class",
            Self::PrimKeyClass => "prim-key-class",
        }
    }

    /// Leaf elements whose text is a class that belongs in the bean jar.
    pub fn is_class_role(&self) -> bool {
        matches!(
            self,
            Self::Home
                | Self::Remote
                | Self::Local
                | Self::LocalHome
                | Self::EjbClass
                | Self::PrimKeyClass
        )
    }

    /// Tags that open or close a level of the [`ParseState`] hierarchy.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::EjbJar | Self::EnterpriseBeans | Self::Session | Self::Entity | Self::MessageDriven
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseState {
    #[default]
    SeekingRoot,
    InRoot,
    InBeanGroup,
    InSessionBean,
    InEntityBean,
    InMessageBean,
}

impl ParseState {
    /// State after opening `tag`, or `None` when `tag` does not open the next level.
    pub fn enter(self, tag: DescriptorTag) -> Option<Self> {
        use DescriptorTag as T;
        match (self, tag) {
            (Self::SeekingRoot, T::EjbJar) => Some(Self::InRoot),
            (Self::InRoot, T::EnterpriseBeans) => Some(Self::InBeanGroup),
            (Self::InBeanGroup, T::Session) => Some(Self::InSessionBean),
            (Self::InBeanGroup, T::Entity) => Some(Self::InEntityBean),
            (Self::InBeanGroup, T::MessageDriven) => Some(Self::InMessageBean),
            _ => None,
        }
    }

    /// State after closing `tag`, or `None` when `tag` did not open the current level.
    pub fn leave(self, tag: DescriptorTag) -> Option<Self> {
        use DescriptorTag as T;
        match (self, tag) {
            (Self::InSessionBean, T::Session)
            | (Self::InEntityBean, T::Entity)
            | (Self::InMessageBean, T::MessageDriven) => Some(Self::InBeanGroup),
            (Self::InBeanGroup, T::EnterpriseBeans) => Some(Self::InRoot),
            (Self::InRoot, T::EjbJar) => Some(Self::SeekingRoot),
            _ => None,
        }
    }

    pub fn is_bean(&self) -> bool {
        matches!(
            self,
            Self::InSessionBean | Self::InEntityBean | Self::InMessageBean
        )
    }
}
