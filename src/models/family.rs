use crate::constants::{
    ASSET_DESCRIPTIONS, ASSET_KEYS, LEGACY_PROCESS_TITLES, MODERN_PROCESS_TITLES,
};

/// One of the two broadcast channels. Each tracked family owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Modern,
    Legacy,
}

impl Channel {
    pub const ALL: [Channel; 2] = [Channel::Modern, Channel::Legacy];

    pub fn index(self) -> usize {
        match self {
            Channel::Modern => 0,
            Channel::Legacy => 1,
        }
    }

    /// Pick the channel with the larger count. Ties go to `Modern`.
    pub fn dominant(modern_count: usize, legacy_count: usize) -> Self {
        if legacy_count > modern_count {
            Channel::Legacy
        } else {
            Channel::Modern
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Modern => write!(f, "GameMaker"),
            Channel::Legacy => write!(f, "GameMaker: Studio"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub key: String,
    pub description: String,
}

/// A group of executables sharing one broadcast channel.
#[derive(Debug, Clone)]
pub struct ApplicationFamily {
    pub channel: Channel,
    pub process_titles: Vec<String>,
    pub application_id: String,
    pub asset: Asset,
}

impl ApplicationFamily {
    pub fn new(channel: Channel, application_id: &str) -> Self {
        let titles: &[&str] = match channel {
            Channel::Modern => &MODERN_PROCESS_TITLES,
            Channel::Legacy => &LEGACY_PROCESS_TITLES,
        };
        let (key, description) = match channel {
            Channel::Modern => (ASSET_KEYS[0], ASSET_DESCRIPTIONS[0]),
            Channel::Legacy => (ASSET_KEYS[1], ASSET_DESCRIPTIONS[1]),
        };

        Self {
            channel,
            process_titles: titles.iter().map(|t| (*t).to_string()).collect(),
            application_id: application_id.to_string(),
            asset: Asset {
                key: key.to_string(),
                description: description.to_string(),
            },
        }
    }

    pub fn title_refs(&self) -> Vec<&str> {
        self.process_titles.iter().map(String::as_str).collect()
    }
}

/// Both tracked families, indexed by [`Channel::index`].
#[derive(Debug, Clone)]
pub struct Families([ApplicationFamily; 2]);

impl Families {
    pub fn new(application_ids: &[String; 2]) -> Self {
        let [modern_id, legacy_id] = application_ids;
        Self([
            ApplicationFamily::new(Channel::Modern, modern_id),
            ApplicationFamily::new(Channel::Legacy, legacy_id),
        ])
    }

    pub fn get(&self, channel: Channel) -> &ApplicationFamily {
        let [modern, legacy] = &self.0;
        match channel {
            Channel::Modern => modern,
            Channel::Legacy => legacy,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ApplicationFamily> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_APPLICATION_IDS;

    fn default_ids() -> [String; 2] {
        DEFAULT_APPLICATION_IDS.map(str::to_string)
    }

    #[test]
    fn test_dominant_tie_favors_modern() {
        assert_eq!(Channel::dominant(0, 0), Channel::Modern);
        assert_eq!(Channel::dominant(2, 2), Channel::Modern);
        assert_eq!(Channel::dominant(1, 0), Channel::Modern);
        assert_eq!(Channel::dominant(1, 2), Channel::Legacy);
    }

    #[test]
    fn test_families_are_indexed_by_channel() {
        let families = Families::new(&default_ids());

        let modern = families.get(Channel::Modern);
        assert_eq!(modern.application_id, "634416362898325534");
        assert_eq!(modern.asset.key, "gamemaker_logo");
        assert!(modern.process_titles.contains(&"GameMaker-LTS".to_string()));

        let legacy = families.get(Channel::Legacy);
        assert_eq!(legacy.application_id, "990567886772903986");
        assert_eq!(legacy.asset.description, "GameMaker: Studio");
        assert_eq!(legacy.title_refs(), vec!["GameMaker-Studio"]);

        let order: Vec<Channel> = families.iter().map(|f| f.channel).collect();
        assert_eq!(order, Channel::ALL.to_vec());
    }
}
