#[cfg(test)]
mod exchange;
#[cfg(test)]
mod probe;
#[cfg(test)]
mod utils;
