mod setup;
mod withdraw;
