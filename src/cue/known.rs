pub mod file_formats {
    pub const BINARY: &str = "BINARY";
    pub const MOTOROLA: &str = "MOTOROLA";
    pub const AIFF: &str = "AIFF";
    pub const WAVE: &str = "WAVE";
    pub const MP3: &str = "MP3";
}

pub mod track_modes {
    pub const AUDIO: &str = "AUDIO";
    pub const CDG: &str = "CDG";
    pub const MODE1_2048: &str = "MODE1/2048";
    pub const MODE1_2352: &str = "MODE1/2352";
    pub const MODE2_2336: &str = "MODE2/2336";
    pub const MODE2_2352: &str = "MODE2/2352";
    pub const CDI_2336: &str = "CDI/2336";
    pub const CDI_2352: &str = "CDI/2352";
}

pub mod track_flags {
    pub const PRE_EMPHASIS: &str = "PRE";
    pub const DIGITAL_COPY_PERMITTED: &str = "DCP";
    pub const FOUR_CHANNEL_AUDIO: &str = "4CH";
    pub const SERIAL_COPY_MANAGEMENT: &str = "SCMS";
}
