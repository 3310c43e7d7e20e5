//! Embedded dictionaries for session codes.

pub(super) const ADJECTIVES: &[&str] = &[
    "able", "ancient", "bitter", "bold", "brave", "bright", "broad", "calm", "clever", "cold",
    "cosmic", "curious", "daring", "deep", "eager", "early", "fancy", "fierce", "fleet", "fond",
    "gentle", "giant", "grand", "happy", "hasty", "hidden", "humble", "jolly", "keen", "kind",
    "little", "lively", "loud", "lucky", "mellow", "mighty", "nimble", "noble", "patient", "plucky",
    "proud", "quick", "quiet", "rapid", "rustic", "silent", "sleepy", "smooth", "steady", "stout",
    "swift", "tender", "tidy", "vivid", "wild", "wise", "witty", "young",
];

pub(super) const COLORS: &[&str] = &[
    "amber", "aqua", "azure", "beige", "black", "blue", "bronze", "brown", "coral", "crimson",
    "cyan", "gold", "gray", "green", "indigo", "ivory", "jade", "lilac", "magenta", "maroon",
    "olive", "orange", "pink", "plum", "purple", "red", "rose", "scarlet", "silver", "teal",
    "violet", "white", "yellow",
];

pub(super) const ANIMALS: &[&str] = &[
    "badger", "bat", "bear", "beaver", "bison", "crane", "crab", "deer", "dingo", "dove",
    "eagle", "falcon", "ferret", "finch", "fox", "frog", "gecko", "goose", "hare", "hawk",
    "heron", "hound", "ibis", "koala", "lemur", "lynx", "mole", "moose", "mouse", "newt",
    "otter", "owl", "panda", "pony", "puffin", "rabbit", "raven", "robin", "seal", "shrew",
    "sparrow", "stork", "swan", "tiger", "toad", "trout", "turtle", "viper", "weasel", "wolf",
    "wombat", "wren",
];
