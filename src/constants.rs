// src/constants.rs

/// Display name of this application
pub const APPLICATION_NAME: &str = "GameMaker Companion";

/// Lower bound for both the poll interval and the exit grace delay
pub const MIN_DELAY_MS: u64 = 200;

/// Default time between process checks
pub const DEFAULT_CHECK_DELAY_MS: u64 = 5000;

/// Default time before presence is removed once GameMaker has exited
pub const DEFAULT_EXIT_DELAY_MS: u64 = 7000;

/// Default minimum time between two uptime notifications
pub const DEFAULT_NOTIFICATION_COOLDOWN_MS: u64 = 5000;

/// Delay between consecutive URL launches
pub const URL_OPENING_DELAY_MS: u64 = 200;

/// Some kernels clip process names to this many bytes
pub const PROCESS_NAME_LIMIT: usize = 15;

/// Process name of the game runner spawned by the IDE
pub const RUNNER_PROCESS: &str = "Runner";

/// Window title markers that precede the IDE name, newest first
pub const PROJECT_SUFFIX_MARKERS: [&str; 2] = [" - GameMaker", ".project.gmx  -"];

/// Window titles shown while the IDE sits on its start page
pub const START_PAGE_TITLES: [&str; 2] = ["Start Page - GameMaker", "<new game>  -"];

/// Executable names of the current IDE
pub const MODERN_PROCESS_TITLES: [&str; 8] = [
    "GameMaker",
    "GameMaker-LTS",
    "GameMaker-Beta",
    "GameMaker Studio 2",
    "GameMaker Studio 2-Beta",
    "GameMakerStudio",
    "GameMakerStudio.exe",
    "GameMaker.exe",
];

/// Executable names of the legacy IDE
pub const LEGACY_PROCESS_TITLES: [&str; 1] = ["GameMaker-Studio"];

/// Discord application ids, indexed by channel
pub const DEFAULT_APPLICATION_IDS: [&str; 2] = ["634416362898325534", "990567886772903986"];

/// Rich Presence image keys, indexed by channel
pub const ASSET_KEYS: [&str; 2] = ["gamemaker_logo", "gamemakerstudio_logo"];

/// Rich Presence image descriptions, indexed by channel
pub const ASSET_DESCRIPTIONS: [&str; 2] = ["GameMaker", "GameMaker: Studio"];

/// User-facing presence text
pub mod label {
    pub const START_PAGE: &str = "On the Start Page";
    pub const PROJECT_OPEN: &str = "Working on";
    pub const PROJECT_TITLE_HIDDEN: &str = " a project";
    pub const MULTIPLE_PROJECTS: &str = " projects";
    pub const MAIN_WORKSPACE: &str = "In main workspace";
    pub const RUNNING_APPLICATION: &str = "Running the application";
    pub const TRACKED_UPTIME: &str = "GameMaker uptime: ";
}

/// GameMaker web resources reachable from the console
pub const WEB_LINKS: [(&str, &str); 10] = [
    ("homepage", "https://gamemaker.io"),
    ("manual", "https://manual.gamemaker.io/monthly"),
    ("manual-lts", "https://manual.gamemaker.io/lts"),
    ("manual-beta", "https://manual.gamemaker.io/beta"),
    ("releases", "https://releases.gamemaker.io"),
    ("forum", "https://forum.gamemaker.io"),
    ("marketplace", "https://marketplace.gamemaker.io"),
    ("account", "https://id.gamemaker.io"),
    ("help", "https://help.gamemaker.io"),
    ("repositories", "https://github.com/YoYoGames"),
];
