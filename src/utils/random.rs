/// Uniform index in `0..len`, `0` for an empty range.
pub fn random_index(len: usize) -> usize
{
        if len == 0
        {
                return 0;
        }

        rand::random_range(0..len)
}
